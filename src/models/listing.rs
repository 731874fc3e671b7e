use serde::Deserialize;

use crate::error::AppError;
use crate::salary::{self, SALARY_NOT_LISTED};

pub const NOT_AVAILABLE: &str = "N/A";
pub const LOCATION_NOT_LISTED: &str = "Location not listed";

/// A job posting in the unified schema. `salary` is annualized.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub title: String,
    pub salary: Option<f64>,
    pub location: String,
}

/// A job card pulled off the rendered search results page.
#[derive(Debug, Clone, Default)]
pub struct ScrapedRecord {
    pub title: Option<String>,
    pub salary: Option<String>,
    pub location: Option<String>,
}

/// One entry of the search API's `results` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<ApiLocation>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiLocation {
    #[serde(default)]
    pub area: Vec<String>,
}

/// A raw record as produced by a collector, tagged by where it came from.
#[derive(Debug, Clone)]
pub enum RawListing {
    Scraped(ScrapedRecord),
    Api(ApiRecord),
}

impl RawListing {
    /// Map the source-specific shape into a [`Listing`].
    pub fn into_listing(self) -> Result<Listing, AppError> {
        match self {
            RawListing::Scraped(record) => record.into_listing(),
            RawListing::Api(record) => Ok(record.into_listing()),
        }
    }
}

impl ScrapedRecord {
    fn into_listing(self) -> Result<Listing, AppError> {
        let title = non_blank(self.title)
            .ok_or_else(|| AppError::Parse("job card has no title".to_string()))?;
        let salary_text = non_blank(self.salary).unwrap_or_else(|| SALARY_NOT_LISTED.to_string());
        let location = non_blank(self.location).unwrap_or_else(|| LOCATION_NOT_LISTED.to_string());

        Ok(Listing {
            title,
            salary: salary::normalize(Some(&salary_text)),
            location,
        })
    }
}

impl ApiRecord {
    fn into_listing(self) -> Listing {
        let title = non_blank(self.title).unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let location = self
            .location
            .map(|loc| loc.area.join(", "))
            .and_then(|joined| non_blank(Some(joined)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        // API figures are already yearly.
        let salary = match (valid_amount(self.salary_min), valid_amount(self.salary_max)) {
            (Some(min), Some(max)) => Some(min / 2.0 + max / 2.0),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        };

        Listing {
            title,
            salary,
            location,
        }
    }
}

/// Map a batch of raw records, dropping (and logging) the ones that fail.
pub fn map_batch(collector: &str, raws: Vec<RawListing>) -> Vec<Listing> {
    let total = raws.len();
    let listings: Vec<Listing> = raws
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| match raw.into_listing() {
            Ok(listing) => Some(listing),
            Err(e) => {
                tracing::warn!("Skipping {collector} record {idx}: {e}");
                None
            }
        })
        .collect();

    tracing::debug!("Mapped {}/{total} {collector} records", listings.len());
    listings
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn valid_amount(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

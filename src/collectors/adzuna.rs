use async_trait::async_trait;
use serde_json::Value;

use crate::collectors::{JobCollector, SearchQuery};
use crate::config::Config;
use crate::error::AppError;
use crate::models::listing::{ApiRecord, RawListing};

const BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs";

/// Credentials and paging settings for the Adzuna search API.
#[derive(Debug, Clone)]
pub struct AdzunaConfig {
    pub app_id: String,
    pub app_key: String,
    pub country: String,
    pub results_per_page: u32,
}

impl AdzunaConfig {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let adzuna = Self {
            app_id: config.app_id.clone().unwrap_or_default(),
            app_key: config.app_key.clone().unwrap_or_default(),
            country: config.country.clone(),
            results_per_page: config.results_per_page,
        };
        adzuna.validate()?;
        Ok(adzuna)
    }

    /// Reject missing credentials before any request goes out.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.app_id.trim().is_empty() {
            return Err(AppError::Config("APP_ID is not set".to_string()));
        }
        if self.app_key.trim().is_empty() {
            return Err(AppError::Config("APP_KEY is not set".to_string()));
        }
        if self.country.trim().is_empty() {
            return Err(AppError::Config("Adzuna country code is empty".to_string()));
        }
        if self.results_per_page == 0 {
            return Err(AppError::Config(
                "results per page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct Adzuna {
    config: AdzunaConfig,
    client: reqwest::Client,
}

impl Adzuna {
    pub fn new(config: AdzunaConfig) -> Result<Self, AppError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("jobaggregator/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    /// Adzuna pages are 1-based.
    fn page_url(&self, page: u32) -> String {
        format!("{BASE_URL}/{}/search/{}", self.config.country, page + 1)
    }
}

#[async_trait]
impl JobCollector for Adzuna {
    fn name(&self) -> &str {
        "adzuna"
    }

    async fn fetch_page(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> Result<Vec<RawListing>, AppError> {
        let per_page = self.config.results_per_page.to_string();
        let resp = self
            .client
            .get(self.page_url(page))
            .query(&[
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
                ("results_per_page", per_page.as_str()),
                ("what", query.title.as_str()),
                ("where", query.location.as_str()),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AppError::Status {
                collector: self.name().to_string(),
                status: resp.status().as_u16(),
            });
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Failed to parse Adzuna response: {e}")))?;

        parse_results(&data)
    }
}

/// Parse the search response into raw records. Entries that don't fit the
/// expected shape are logged and dropped; the rest of the page survives.
fn parse_results(data: &Value) -> Result<Vec<RawListing>, AppError> {
    let results = data
        .get("results")
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::Parse("Missing 'results' in response".to_string()))?;

    let mut records = Vec::with_capacity(results.len());
    for (idx, raw) in results.iter().enumerate() {
        match serde_json::from_value::<ApiRecord>(raw.clone()) {
            Ok(record) => records.push(RawListing::Api(record)),
            Err(e) => tracing::warn!("Skipping malformed Adzuna result {idx}: {e}"),
        }
    }
    Ok(records)
}

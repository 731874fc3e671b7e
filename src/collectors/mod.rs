// Collector module.
// Defines the trait for job sources and the page-by-page collection loop.

pub mod adzuna;
pub mod indeed;
pub mod runner;
pub mod webdriver;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::AppError;
use crate::models::listing::RawListing;

/// Characters that encodeURIComponent does NOT encode.
/// RFC 3986 unreserved: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const ENCODE_URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Search terms supplied once at the start of a run. Either may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: String,
    pub location: String,
}

/// Trait that all job collectors must implement.
/// Each collector fetches one page of raw records from an external source.
/// Page indexes start at 0; translating that into the source's own offset
/// convention is the collector's job.
#[async_trait]
pub trait JobCollector: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch raw records for `page`. An empty vector means the source has
    /// nothing (more) for this query.
    async fn fetch_page(&self, query: &SearchQuery, page: u32)
    -> Result<Vec<RawListing>, AppError>;
}

/// URL-encode a string for use in query parameters.
pub(crate) fn urlencoded(s: &str) -> String {
    utf8_percent_encode(s, ENCODE_URI_COMPONENT_SET).to_string()
}

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::collectors::webdriver::WebDriver;
use crate::collectors::{JobCollector, SearchQuery, urlencoded};
use crate::error::AppError;
use crate::models::listing::{RawListing, ScrapedRecord};

const BASE_URL: &str = "https://www.indeed.com/jobs";
const PAGE_SIZE: u32 = 10;

static CARD: LazyLock<Selector> = LazyLock::new(|| selector(".job_seen_beacon"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".jobTitle"));
static SALARY: LazyLock<Selector> = LazyLock::new(|| selector(".salary-snippet-container"));
static LOCATION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[data-testid="text-location"]"#));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid static selector")
}

/// Scrapes the rendered Indeed search results page through a browser.
pub struct Indeed {
    driver: WebDriver,
    page_load_wait: Duration,
}

impl Indeed {
    pub fn new(driver: WebDriver, page_load_wait: Duration) -> Self {
        Self {
            driver,
            page_load_wait,
        }
    }

    /// Verify the browser driver is available. Called once before the loop.
    pub async fn ensure_ready(&self) -> Result<(), AppError> {
        self.driver.ensure_ready().await
    }

    async fn render(&self, url: &str) -> Result<String, AppError> {
        let session = self.driver.new_session().await?;

        let html = async {
            session.navigate(url).await?;
            tokio::time::sleep(self.page_load_wait).await;
            session.page_source().await
        }
        .await;

        // The browser is closed whether or not the page came back.
        if let Err(e) = session.quit().await {
            tracing::warn!("Failed to close browser session: {e}");
        }

        html
    }
}

#[async_trait]
impl JobCollector for Indeed {
    fn name(&self) -> &str {
        "indeed"
    }

    async fn fetch_page(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> Result<Vec<RawListing>, AppError> {
        let url = search_url(query, page);
        tracing::debug!("Loading {url}");
        let html = self.render(&url).await?;

        Ok(parse_search_page(&html)
            .into_iter()
            .map(RawListing::Scraped)
            .collect())
    }
}

fn search_url(query: &SearchQuery, page: u32) -> String {
    format!(
        "{BASE_URL}?q={}&l={}&start={}",
        urlencoded(&query.title),
        urlencoded(&query.location),
        page * PAGE_SIZE
    )
}

/// Pull every job card off a results page. Missing fields stay `None`.
fn parse_search_page(html: &str) -> Vec<ScrapedRecord> {
    let document = Html::parse_document(html);
    document
        .select(&CARD)
        .map(|card| ScrapedRecord {
            title: first_text(card, &TITLE),
            salary: first_text(card, &SALARY),
            location: first_text(card, &LOCATION),
        })
        .collect()
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <ul>
            <li><div class="cardOutline"><div class="job_seen_beacon">
              <h2 class="jobTitle"><a><span>Senior   Rust Engineer</span></a></h2>
              <div data-testid="text-location">Remote</div>
              <div class="salary-snippet-container"><div>$80,000 - $100,000 a year</div></div>
            </div></div></li>
            <li><div class="job_seen_beacon">
              <h2 class="jobTitle"><span>Line Cook</span></h2>
              <div data-testid="text-location">Austin, TX 78701</div>
            </div></li>
            <li><div class="job_seen_beacon">
              <div class="salary-snippet-container">$40 an hour</div>
            </div></li>
          </ul>
        </body></html>
    "#;

    #[test]
    fn search_url_encodes_terms_and_offsets_by_page() {
        let query = SearchQuery {
            title: "rust developer".into(),
            location: "New York, NY".into(),
        };
        assert_eq!(
            search_url(&query, 0),
            "https://www.indeed.com/jobs?q=rust%20developer&l=New%20York%2C%20NY&start=0"
        );
        assert!(search_url(&query, 3).ends_with("&start=30"));
    }

    #[test]
    fn parses_every_card() {
        let records = parse_search_page(PAGE);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].title.as_deref(), Some("Senior Rust Engineer"));
        assert_eq!(records[0].salary.as_deref(), Some("$80,000 - $100,000 a year"));
        assert_eq!(records[0].location.as_deref(), Some("Remote"));

        assert_eq!(records[1].salary, None);
        assert_eq!(records[1].location.as_deref(), Some("Austin, TX 78701"));

        assert_eq!(records[2].title, None);
    }

    #[test]
    fn page_without_cards_is_empty() {
        assert!(parse_search_page("<html><body><p>No results</p></body></html>").is_empty());
    }
}

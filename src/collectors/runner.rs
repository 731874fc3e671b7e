use crate::collectors::{JobCollector, SearchQuery};
use crate::interaction::Interaction;
use crate::models::listing::{Listing, map_batch};
use crate::reconcile::combine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Fetching { page: u32 },
    AwaitContinue { page: u32 },
    /// A page came back empty from both sources.
    Terminated,
    /// The caller declined to fetch another page.
    Stopped,
}

impl LoopState {
    pub fn is_terminal(self) -> bool {
        matches!(self, LoopState::Terminated | LoopState::Stopped)
    }
}

/// Drives page-by-page collection across the API and scraped collectors,
/// accumulating every reconciled page in fetch order.
pub struct CollectionLoop<'a> {
    api: &'a dyn JobCollector,
    scraped: &'a dyn JobCollector,
    query: SearchQuery,
    state: LoopState,
    listings: Vec<Listing>,
    pages_fetched: u32,
}

impl<'a> CollectionLoop<'a> {
    pub fn new(
        api: &'a dyn JobCollector,
        scraped: &'a dyn JobCollector,
        query: SearchQuery,
    ) -> Self {
        Self {
            api,
            scraped,
            query,
            state: LoopState::Fetching { page: 0 },
            listings: Vec::new(),
            pages_fetched: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Everything collected so far.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn into_listings(self) -> Vec<Listing> {
        self.listings
    }

    /// Advance one transition and return the new state. Terminal states are
    /// sticky.
    pub async fn step(&mut self, decider: &mut dyn Interaction) -> LoopState {
        let current = self.state;
        self.state = match current {
            LoopState::Fetching { page } => self.fetch(page).await,
            LoopState::AwaitContinue { page } => {
                match decider.should_continue(page, self.listings()) {
                    Ok(true) => LoopState::Fetching { page: page + 1 },
                    Ok(false) => LoopState::Stopped,
                    Err(e) => {
                        tracing::warn!("No continue decision after page {page}, stopping: {e}");
                        LoopState::Stopped
                    }
                }
            }
            terminal => terminal,
        };
        self.state
    }

    /// Step until a terminal state is reached.
    pub async fn run(mut self, decider: &mut dyn Interaction) -> CollectionSummary {
        while !self.state().is_terminal() {
            self.step(decider).await;
        }

        let state = self.state();
        let pages = self.pages_fetched();
        tracing::info!(
            "Collection finished ({state:?}) after {pages} page(s): {} listings",
            self.listings().len()
        );

        CollectionSummary {
            state,
            pages,
            listings: self.into_listings(),
        }
    }

    async fn fetch(&mut self, page: u32) -> LoopState {
        // API first, then the browser; reconciled scraped-first.
        let from_api = collect_page(self.api, &self.query, page).await;
        let from_scrape = collect_page(self.scraped, &self.query, page).await;
        let combined = combine(from_scrape, from_api);
        self.pages_fetched += 1;

        if combined.is_empty() {
            tracing::info!("No more jobs found on page {page}");
            return LoopState::Terminated;
        }

        tracing::info!("Page {page}: {} listings", combined.len());
        self.listings.extend(combined);
        LoopState::AwaitContinue { page }
    }
}

/// Fetch and map one page from a single collector. Failures degrade to an
/// empty page.
async fn collect_page(
    collector: &dyn JobCollector,
    query: &SearchQuery,
    page: u32,
) -> Vec<Listing> {
    match collector.fetch_page(query, page).await {
        Ok(raws) => map_batch(collector.name(), raws),
        Err(e) => {
            tracing::error!("{} failed on page {page}: {e}", collector.name());
            Vec::new()
        }
    }
}

#[derive(Debug)]
pub struct CollectionSummary {
    pub state: LoopState,
    pub pages: u32,
    pub listings: Vec<Listing>,
}

//! Decisions the collection run needs from the outside: the query terms,
//! whether to fetch another page, and whether to save the results.

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use crate::collectors::SearchQuery;
use crate::error::AppError;
use crate::export::render_table;
use crate::models::listing::Listing;

pub trait Interaction {
    /// Query terms for the whole run. Asked once, before the first page.
    fn query(&mut self) -> Result<SearchQuery, AppError>;

    /// Called after every non-empty page with everything accumulated so far.
    fn should_continue(&mut self, page: u32, listings: &[Listing]) -> Result<bool, AppError>;

    /// Called once at the end, only when something was collected.
    fn should_save(&mut self, listings: &[Listing]) -> Result<bool, AppError>;
}

/// Interactive terminal prompts.
pub struct Prompt {
    title: Option<String>,
    location: Option<String>,
    theme: ColorfulTheme,
}

impl Prompt {
    /// Terms already given on the command line are not asked again.
    pub fn new(title: Option<String>, location: Option<String>) -> Self {
        Self {
            title,
            location,
            theme: ColorfulTheme::default(),
        }
    }

    fn ask(&self, prompt: &str) -> Result<String, AppError> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, AppError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}

impl Interaction for Prompt {
    fn query(&mut self) -> Result<SearchQuery, AppError> {
        let title = match self.title.take() {
            Some(title) => title,
            None => self.ask("Job title (leave blank to search all jobs)")?,
        };
        let location = match self.location.take() {
            Some(location) => location,
            None => self.ask("Location (leave blank to search all locations)")?,
        };
        Ok(SearchQuery {
            title: title.trim().to_string(),
            location: location.trim().to_string(),
        })
    }

    fn should_continue(&mut self, _page: u32, listings: &[Listing]) -> Result<bool, AppError> {
        println!();
        println!("{}", style("Current combined job data:").bold());
        print!("{}", render_table(listings));
        println!();
        self.confirm("Load more jobs?", true)
    }

    fn should_save(&mut self, _listings: &[Listing]) -> Result<bool, AppError> {
        self.confirm("Save the results to a CSV file?", true)
    }
}

/// Non-interactive driver: fixed query, a page cap and a save flag.
#[derive(Debug, Clone)]
pub struct Scripted {
    query: SearchQuery,
    max_pages: Option<u32>,
    save: bool,
}

impl Scripted {
    pub fn new(query: SearchQuery, max_pages: Option<u32>, save: bool) -> Self {
        Self {
            query,
            max_pages,
            save,
        }
    }
}

impl Interaction for Scripted {
    fn query(&mut self) -> Result<SearchQuery, AppError> {
        Ok(self.query.clone())
    }

    fn should_continue(&mut self, page: u32, listings: &[Listing]) -> Result<bool, AppError> {
        tracing::info!("Page {page} done, {} listings so far", listings.len());
        Ok(self.max_pages.is_none_or(|max| page + 1 < max))
    }

    fn should_save(&mut self, _listings: &[Listing]) -> Result<bool, AppError> {
        Ok(self.save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_stops_at_page_cap() {
        let mut scripted = Scripted::new(SearchQuery::default(), Some(2), false);
        assert!(scripted.should_continue(0, &[]).unwrap());
        assert!(!scripted.should_continue(1, &[]).unwrap());
        assert!(!scripted.should_save(&[]).unwrap());
    }

    #[test]
    fn scripted_without_cap_always_continues() {
        let mut scripted = Scripted::new(SearchQuery::default(), None, true);
        assert!(scripted.should_continue(41, &[]).unwrap());
        assert!(scripted.should_save(&[]).unwrap());
    }

    #[test]
    fn prompt_uses_terms_given_up_front() {
        let mut prompt = Prompt::new(Some(" rust ".into()), Some("Remote".into()));
        assert_eq!(
            prompt.query().unwrap(),
            SearchQuery {
                title: "rust".into(),
                location: "Remote".into(),
            }
        );
    }
}

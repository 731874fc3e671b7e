mod collectors;
mod config;
mod error;
mod export;
mod interaction;
mod models;
mod reconcile;
mod salary;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::collectors::adzuna::{Adzuna, AdzunaConfig};
use crate::collectors::indeed::Indeed;
use crate::collectors::runner::CollectionLoop;
use crate::collectors::webdriver::WebDriver;
use crate::collectors::SearchQuery;
use crate::config::Config;
use crate::interaction::{Interaction, Prompt, Scripted};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobaggregator=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    // Both sources must be usable before anything is fetched.
    let adzuna = Adzuna::new(AdzunaConfig::from_config(&config)?)?;
    let indeed = Indeed::new(
        WebDriver::new(&config.webdriver_url)?,
        Duration::from_secs(config.page_load_wait),
    );
    indeed.ensure_ready().await?;

    let mut interaction: Box<dyn Interaction> = if config.non_interactive {
        Box::new(Scripted::new(
            SearchQuery {
                title: config.title.clone().unwrap_or_default(),
                location: config.location.clone().unwrap_or_default(),
            },
            config.max_pages,
            config.save,
        ))
    } else {
        Box::new(Prompt::new(config.title.clone(), config.location.clone()))
    };

    let query = interaction.query()?;
    tracing::info!(
        "Searching for '{}' in '{}'",
        query.title,
        query.location
    );

    let summary = CollectionLoop::new(&adzuna, &indeed, query)
        .run(interaction.as_mut())
        .await;

    if summary.listings.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    if config.non_interactive {
        print!("{}", export::render_table(&summary.listings));
    }

    if interaction.should_save(&summary.listings)? {
        export::write_csv(&config.output, &summary.listings)?;
        println!("Data saved to '{}'.", config.output.display());
    } else {
        println!("Data not saved.");
    }

    Ok(())
}

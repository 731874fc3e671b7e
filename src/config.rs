use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "jobaggregator",
    about = "Collect job listings from Indeed and Adzuna into one table"
)]
pub struct Config {
    /// Job title to search for (prompted when omitted in interactive mode)
    #[arg(long, env = "JOB_TITLE")]
    pub title: Option<String>,

    /// Location to search in (prompted when omitted in interactive mode)
    #[arg(long, env = "JOB_LOCATION")]
    pub location: Option<String>,

    /// Adzuna application id
    #[arg(long, env = "APP_ID", hide_env_values = true)]
    pub app_id: Option<String>,

    /// Adzuna application key
    #[arg(long, env = "APP_KEY", hide_env_values = true)]
    pub app_key: Option<String>,

    /// Adzuna country code
    #[arg(long, env = "ADZUNA_COUNTRY", default_value = "us")]
    pub country: String,

    /// Results requested per Adzuna page
    #[arg(long, env = "RESULTS_PER_PAGE", default_value = "10")]
    pub results_per_page: u32,

    /// WebDriver endpoint (e.g. a running chromedriver)
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    /// Seconds to let the results page render before reading it
    #[arg(long, env = "PAGE_LOAD_WAIT", default_value = "5")]
    pub page_load_wait: u64,

    /// Where to write the CSV when saving
    #[arg(long, env = "OUTPUT_PATH", default_value = "combined_job_data.csv")]
    pub output: PathBuf,

    /// Run without prompts; use --max-pages and --save to steer the run
    #[arg(long)]
    pub non_interactive: bool,

    /// Stop after this many non-empty pages (non-interactive only)
    #[arg(
        long,
        requires = "non_interactive",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_pages: Option<u32>,

    /// Save the results without asking (non-interactive only)
    #[arg(long, requires = "non_interactive")]
    pub save: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let config = Config::try_parse_from(["jobaggregator", "--title", "rust"]).unwrap();
        assert_eq!(config.title.as_deref(), Some("rust"));
        assert_eq!(config.results_per_page, 10);
        assert_eq!(config.page_load_wait, 5);
        assert_eq!(config.output, PathBuf::from("combined_job_data.csv"));
        assert!(!config.non_interactive);
    }

    #[test]
    fn scripted_flags_require_non_interactive() {
        assert!(Config::try_parse_from(["jobaggregator", "--save"]).is_err());
        let config = Config::try_parse_from([
            "jobaggregator",
            "--non-interactive",
            "--max-pages",
            "3",
            "--save",
        ])
        .unwrap();
        assert_eq!(config.max_pages, Some(3));
        assert!(config.save);
    }

    #[test]
    fn zero_page_cap_is_rejected() {
        let result = Config::try_parse_from([
            "jobaggregator",
            "--non-interactive",
            "--max-pages",
            "0",
        ]);
        assert!(result.is_err());
    }
}

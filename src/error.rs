#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{collector} returned {status}")]
    Status { collector: String, status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WebDriver error: {0}")]
    WebDriver(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_the_collector() {
        let err = AppError::Status {
            collector: "adzuna".to_string(),
            status: 401,
        };
        assert_eq!(err.to_string(), "adzuna returned 401");
    }

    #[test]
    fn io_errors_convert() {
        let err: AppError = std::io::Error::other("disk full").into();
        assert!(matches!(err, AppError::Io(_)));
    }
}

//! Error types for site scraping operations

/// Result type for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors raised while fetching or extracting pages from the transcript site
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ScrapeError {
    /// Shorthand for a parse error describing missing or malformed markup
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

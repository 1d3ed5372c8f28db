//! Error types for the crawler module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for crawler operations
///
/// A page answering with a non-success status is not an error; the fetcher
/// reports it as an absent page and the crawl falls back. Only the conditions
/// below stop a video or the whole run.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The channel resolves under neither the user nor the channel scheme
    #[error("The channel does not exist: {0}")]
    NotFound(String),

    /// A video page was absent or carried no title element
    #[error("No title found for video: {0}")]
    MissingTitle(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured CSS selector failed to parse
    #[error("Invalid selector '{selector}': {message}")]
    Selector {
        /// The selector text as configured
        selector: String,
        /// Parser message
        message: String,
    },

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<CrawlError> for CrateError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::NotFound(channel) => CrateError::ChannelNotFound(channel),
            CrawlError::Http(e) => CrateError::Http(e),
            CrawlError::UrlParse(e) => CrateError::Other(format!("URL parse error: {}", e)),
            _ => CrateError::Crawl(err.to_string()),
        }
    }
}

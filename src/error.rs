//! Error types for the tubecrawl crate

use thiserror::Error;

/// Result type for tubecrawl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tubecrawl operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel could not be resolved under any addressing scheme
    #[error("The channel does not exist: {0}")]
    ChannelNotFound(String),

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Export or snapshot storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

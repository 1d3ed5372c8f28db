//! # tubecrawl - Channel Table of Contents Crawler
//!
//! This crate crawls a video channel's playlist pages and builds a nested
//! record of its sections, playlists and videos, including each video's
//! title, duration, view/like/dislike counts, publication date, description
//! and short link.
//!
//! ## Features
//!
//! - Fallback from `/user/<id>` to `/channel/<id>` addressing
//! - Stand-in sections and playlists when a channel exposes none
//! - Per-field tolerance for missing video metadata
//! - A fixed, injectable delay after every request
//! - Configurable CSS selectors
//! - CSV, HTML and JSON snapshot output
//!
//! ## Example
//!
//! ```rust,no_run
//! use tubecrawl::crawler::{CrawlerConfig, crawl_channel};
//! use tubecrawl::export;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CrawlerConfig::builder().request_delay_ms(3000).build();
//!     let channel = crawl_channel("somechannel", config).await?;
//!
//!     println!("{}", export::to_snapshot(&channel)?);
//!     Ok(())
//! }
//! ```

mod error;

pub mod crawler;
pub mod export;
pub mod record;
pub mod storage;

pub use error::Error;

/// Re-export of types module for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::record::{ChannelRecord, PlaylistRecord, SectionRecord, VideoRecord};
}

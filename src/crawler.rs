//! # Channel Crawler Module
//!
//! This module walks a channel's page hierarchy and turns it into a
//! [`ChannelRecord`](crate::record::ChannelRecord) tree. It is the core of the
//! crate; everything else only formats or stores its output.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: Configuration for the crawler, including delay and selectors
//! - `Fetcher`: Rate-limited page fetching through an injectable `Throttle`
//! - `Document`: Selector lookups the extraction steps are written against
//! - `RunContext`: Per-run channel id, addressing scheme and base address
//! - `Crawler` / `crawl_channel`: The full sections → playlists → videos walk
//!
//! ## Crawl Order
//!
//! 1. Resolve the channel under `/user/<id>`, falling back to `/channel/<id>`
//! 2. List the sections on its playlist index
//! 3. List the playlists of each section
//! 4. Extract every video of each playlist
//!
//! Steps run one at a time and every successful fetch is followed by the
//! configured delay. Missing sections, playlists and video fields are
//! replaced by fixed stand-ins instead of failing the crawl.

mod address;
mod channel;
mod config;
mod document;
mod error;
mod fetch;
mod playlists;
mod populate;
mod topology;
mod video;

pub use address::{AddressResolver, AddressScheme, RunContext};
pub use channel::{Crawler, crawl_channel};
pub use config::{
    CrawlerConfig, CrawlerConfigBuilder, DEFAULT_BASE_URL, DEFAULT_REQUEST_DELAY_MS,
    MissingTitlePolicy, SelectorConfig,
};
pub use document::{Document, Element, HtmlPage};
pub use error::CrawlError;
pub use fetch::{Fetcher, FixedDelay, NoDelay, Throttle};
pub use playlists::{enumerate_playlists, parse_playlists};
pub use populate::{VideoTile, parse_video_tiles, populate_playlist};
pub use topology::{MISSING_CHANNEL_MARKER, discover_sections, parse_sections, resolve_channel};
pub use video::{digits_only, extract_fields, extract_video, strip_title_suffix};

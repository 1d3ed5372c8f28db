//! # Crawler Configuration Module
//!
//! This module provides configuration options for the channel crawler: the
//! site being crawled, the politeness delay between requests, and the CSS
//! selectors used to pick data out of each page. It uses a builder pattern
//! for flexible configuration.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: The main configuration struct with crawler parameters
//! - `CrawlerConfigBuilder`: Builder pattern implementation for easier configuration
//! - `SelectorConfig`: Every selector the extraction steps rely on
//! - `MissingTitlePolicy`: What to do with a video whose page has no title
//!
//! Selectors are plain data so they can be loaded from a JSON file when the
//! source markup drifts.

use std::time::Duration;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::crawler::error::CrawlError;

/// Base address of the crawled site
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Default pause after every successful fetch
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 3000;

/// What to do when a video page has no title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTitlePolicy {
    /// Stop the whole crawl
    #[default]
    Abort,
    /// Log the video and leave it out of its playlist, unless it would leave
    /// the playlist empty
    Skip,
}

/// CSS selectors used while walking a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Candidate section links on the playlist index
    pub section_link: String,

    /// Label that must appear inside a real section link
    pub section_label: String,

    /// Playlist entries on a section page and video entries on a playlist page
    pub tile_link: String,

    /// Duration label following a video tile
    pub time_label: String,

    pub video_title: String,
    pub view_count: String,
    pub publication_date: String,
    pub description: String,

    /// Metadata element whose `content` attribute holds the video id
    pub video_id: String,

    pub like_button: String,
    pub dislike_button: String,

    /// Count label inside the like and dislike buttons
    pub button_label: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            section_link: "a[href]".to_string(),
            section_label: "span".to_string(),
            tile_link: "a.yt-uix-tile-link".to_string(),
            time_label: "span[aria-label]".to_string(),
            video_title: "title".to_string(),
            view_count: "div.watch-view-count".to_string(),
            publication_date: "strong.watch-time-text".to_string(),
            description: "div#watch-description-text".to_string(),
            video_id: "meta[itemprop=\"videoId\"]".to_string(),
            like_button: "button.like-button-renderer-like-button".to_string(),
            dislike_button: "button.like-button-renderer-dislike-button".to_string(),
            button_label: "span.yt-uix-button-content".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Load selectors from JSON; keys left out keep their defaults
    pub fn from_json(json: &str) -> Result<Self, CrawlError> {
        serde_json::from_str(json)
            .map_err(|e| CrawlError::Other(format!("Invalid selector configuration: {}", e)))
    }

    fn entries(&self) -> [(&'static str, &str); 12] {
        [
            ("section_link", self.section_link.as_str()),
            ("section_label", self.section_label.as_str()),
            ("tile_link", self.tile_link.as_str()),
            ("time_label", self.time_label.as_str()),
            ("video_title", self.video_title.as_str()),
            ("view_count", self.view_count.as_str()),
            ("publication_date", self.publication_date.as_str()),
            ("description", self.description.as_str()),
            ("video_id", self.video_id.as_str()),
            ("like_button", self.like_button.as_str()),
            ("dislike_button", self.dislike_button.as_str()),
            ("button_label", self.button_label.as_str()),
        ]
    }

    /// Check that every selector parses
    pub fn validate(&self) -> Result<(), CrawlError> {
        for (name, selector) in self.entries() {
            Selector::parse(selector).map_err(|e| CrawlError::Selector {
                selector: selector.to_string(),
                message: format!("{}: {}", name, e),
            })?;
        }
        Ok(())
    }
}

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Site address that relative links and channel pages are built on
    pub base_url: String,

    /// Pause in milliseconds after every successful fetch
    pub request_delay_ms: u64,

    /// User agent to use for requests
    pub user_agent: String,

    /// Selectors for every extraction step
    pub selectors: SelectorConfig,

    /// Handling of videos without a title
    pub missing_title: MissingTitlePolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            user_agent: format!("tubecrawl/{}", env!("CARGO_PKG_VERSION")),
            selectors: SelectorConfig::default(),
            missing_title: MissingTitlePolicy::default(),
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the site base address
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the delay in milliseconds after each successful request
    pub fn request_delay_ms(mut self, request_delay_ms: u64) -> Self {
        self.config.request_delay_ms = request_delay_ms;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Replace the selector set
    pub fn selectors(mut self, selectors: SelectorConfig) -> Self {
        self.config.selectors = selectors;
        self
    }

    /// Set the policy for videos without a title
    pub fn missing_title(mut self, missing_title: MissingTitlePolicy) -> Self {
        self.config.missing_title = missing_title;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Get the request delay as a Duration
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

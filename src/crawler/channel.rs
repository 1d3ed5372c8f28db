//! Whole-channel crawl
//!
//! Sections, playlists and videos are crawled strictly one after another.
//! The only pause between requests is the fetcher's post-fetch delay.

use tracing::{info, instrument};

use crate::crawler::address::{AddressScheme, RunContext};
use crate::crawler::config::CrawlerConfig;
use crate::crawler::error::CrawlError;
use crate::crawler::fetch::{Fetcher, FixedDelay, Throttle};
use crate::crawler::playlists::enumerate_playlists;
use crate::crawler::populate::populate_playlist;
use crate::crawler::topology::discover_sections;
use crate::record::{ChannelRecord, PlaylistRecord, SectionRecord};

/// Crawls channels with a fixed configuration
#[derive(Debug)]
pub struct Crawler<T = FixedDelay> {
    config: CrawlerConfig,
    fetcher: Fetcher<T>,
}

impl Crawler<FixedDelay> {
    /// Create a crawler that sleeps for the configured delay after each fetch
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlError> {
        Self::with_throttle(config, FixedDelay)
    }
}

impl<T: Throttle> Crawler<T> {
    /// Create a crawler with a custom throttle
    ///
    /// Fails if the base address or any configured selector does not parse.
    pub fn with_throttle(config: CrawlerConfig, throttle: T) -> Result<Self, CrawlError> {
        url::Url::parse(&config.base_url)?;
        config.selectors.validate()?;
        let fetcher = Fetcher::with_throttle(&config, throttle)?;
        Ok(Self { config, fetcher })
    }

    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    /// Crawl a channel into a complete record tree
    ///
    /// Fails with [`CrawlError::NotFound`] when the channel exists under
    /// neither addressing scheme.
    #[instrument(skip(self))]
    pub async fn crawl_channel(&self, channel_id: &str) -> Result<ChannelRecord, CrawlError> {
        info!("Finding sections for channel {}", channel_id);

        let selectors = &self.config.selectors;
        let ctx = RunContext::new(&self.config.base_url, channel_id, AddressScheme::User);
        let (ctx, mut sections) = discover_sections(&self.fetcher, &ctx, selectors).await?;
        if sections.iter().any(SectionRecord::is_synthetic) {
            info!("Channel {} lists no sections", channel_id);
        }

        for section in &mut sections {
            section.playlists =
                enumerate_playlists(&self.fetcher, &ctx, section, selectors).await?;
            if section.playlists.iter().any(PlaylistRecord::is_synthetic) {
                info!("Section '{}' lists no playlists", section.title);
            }
            for playlist in &mut section.playlists {
                populate_playlist(
                    &self.fetcher,
                    &ctx,
                    playlist,
                    selectors,
                    self.config.missing_title,
                )
                .await?;
            }
        }

        let channel = ChannelRecord {
            id: channel_id.to_string(),
            scheme: ctx.scheme(),
            sections,
        };
        info!(
            "Crawl finished: {} sections, {} videos",
            channel.sections.len(),
            channel.video_count()
        );
        Ok(channel)
    }
}

/// Crawl a channel with the given configuration
pub async fn crawl_channel(
    channel_id: &str,
    config: CrawlerConfig,
) -> Result<ChannelRecord, CrawlError> {
    Crawler::new(config)?.crawl_channel(channel_id).await
}

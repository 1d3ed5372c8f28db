//! Rate-limited page fetching
//!
//! Every successful fetch is followed by a fixed pause taken through a
//! [`Throttle`], so the request rate stays bounded no matter how fast the
//! site answers. Pages answering with a non-success status come back as
//! `None` and are not throttled.

use std::future::Future;
use std::time::Duration;

use reqwest::Client as ReqwestClient;
use tracing::{debug, instrument};

use crate::crawler::config::CrawlerConfig;
use crate::crawler::document::HtmlPage;
use crate::crawler::error::CrawlError;

/// Pause taken after each successful fetch
pub trait Throttle {
    /// Wait for `interval` before the crawl may continue
    fn wait(&self, interval: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps for the full interval every time
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay;

impl Throttle for FixedDelay {
    fn wait(&self, interval: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(interval)
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Throttle for NoDelay {
    fn wait(&self, _interval: Duration) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}

/// HTTP fetcher returning parsed pages
#[derive(Debug, Clone)]
pub struct Fetcher<T = FixedDelay> {
    client: ReqwestClient,
    delay: Duration,
    throttle: T,
}

impl Fetcher<FixedDelay> {
    /// Create a fetcher that sleeps for the configured delay
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlError> {
        Self::with_throttle(config, FixedDelay)
    }
}

impl<T: Throttle> Fetcher<T> {
    /// Create a fetcher with a custom throttle
    pub fn with_throttle(config: &CrawlerConfig, throttle: T) -> Result<Self, CrawlError> {
        let client = ReqwestClient::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            delay: config.request_delay(),
            throttle,
        })
    }

    /// The throttle this fetcher pauses through
    pub fn throttle(&self) -> &T {
        &self.throttle
    }

    /// Fetch and parse a page
    ///
    /// Returns `Ok(None)` when the server answers with a non-success status.
    /// That covers pages that do not exist as well as server-side failures;
    /// the two are not told apart.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, address: &str) -> Result<Option<HtmlPage>, CrawlError> {
        let response = self.client.get(address).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("Page absent ({}): {}", status, address);
            return Ok(None);
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), address);

        self.throttle.wait(self.delay).await;
        Ok(Some(HtmlPage::parse(&body)))
    }
}

//! HTTP fetcher for the published CSV export
//!
//! The sheet host caches aggressively, so every request carries a
//! cache-busting query parameter and a `no-store` cache directive.

use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use tracing::debug;

use crate::config::Config;
use crate::constants::{CACHE_BUSTER_PARAM, FEED_USER_AGENT};
use crate::{Error, Result};

/// Fetcher bound to the configured feed URL
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
    url: String,
}

impl FeedFetcher {
    /// Build a fetcher with the configured request timeout
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(FEED_USER_AGENT)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::feed_fetch("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            url: config.feed_url.clone(),
        })
    }

    /// Fetch the feed body as text.
    ///
    /// A non-success status is an error; the refresh boundary decides whether
    /// it surfaces (nothing shown yet) or is absorbed (stale data stays up).
    pub async fn fetch_csv(&self) -> Result<String> {
        let url = self.cache_busted_url();
        debug!("fetching feed: {}", url);

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| Error::feed_fetch("feed request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::feed_status(format!(
                "feed responded with HTTP {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::feed_fetch("failed to read feed body", e))
    }

    fn cache_busted_url(&self) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.url,
            separator,
            CACHE_BUSTER_PARAM,
            chrono::Utc::now().timestamp_millis()
        )
    }
}

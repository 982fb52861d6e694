//! Configuration for the feed ingestion engine.
//!
//! Provides the feed location, feed shape selection, polling cadence and the
//! durable watermark location, with validation of operator-supplied values.

use crate::constants::{
    DEFAULT_REFRESH_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_SECS, STATE_DIR_NAME, WATERMARK_FILE_NAME,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Layout of the published feed.
///
/// The sheet has appeared in two shapes over its lifetime; the engine supports
/// both behind this selector rather than duplicating the parsing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FeedShape {
    /// Flat header row naming each column; every data row carries its own
    /// trailing update timestamp. Snapshot freshness is the per-row maximum.
    PerRow,

    /// The first header cell holds a single global update timestamp and the
    /// remaining cells name columns, so every semantic index (and each data
    /// row) is offset by one.
    HeaderGlobal,
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL of the published CSV export
    pub feed_url: String,

    /// Layout of the published feed
    pub feed_shape: FeedShape,

    /// Interval between refresh cycles, in milliseconds
    pub refresh_interval_ms: u64,

    /// Per-request timeout for feed fetches, in seconds
    pub request_timeout_secs: u64,

    /// Location of the persisted freshness watermark.
    ///
    /// `None` selects the platform default under the user config directory;
    /// an unwritable or absent store degrades to an in-memory watermark.
    pub watermark_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: String::new(),
            feed_shape: FeedShape::PerRow,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            watermark_path: None,
        }
    }
}

impl Config {
    /// Validate operator-supplied values before the engine starts polling
    pub fn validate(&self) -> Result<()> {
        if self.feed_url.trim().is_empty() {
            return Err(Error::configuration("feed URL must not be empty"));
        }

        if !self.feed_url.starts_with("http://") && !self.feed_url.starts_with("https://") {
            return Err(Error::configuration(format!(
                "feed URL must be http(s), got '{}'",
                self.feed_url
            )));
        }

        if self.refresh_interval_ms == 0 {
            return Err(Error::configuration(
                "refresh interval must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Refresh cadence as a [`Duration`]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Effective watermark location: the configured path, or the platform
    /// default under the user config directory when one exists.
    pub fn effective_watermark_path(&self) -> Option<PathBuf> {
        self.watermark_path
            .clone()
            .or_else(|| dirs::config_dir().map(|d| d.join(STATE_DIR_NAME).join(WATERMARK_FILE_NAME)))
    }
}

//! Command-line argument definitions for the planfeed engine
//!
//! Defines the CLI interface using the clap derive API. The `watch` command
//! is the long-running operator mode; `inspect` and `details` run a single
//! parse against a URL or a local file for debugging the sheet.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, FeedShape};

/// CLI arguments for the planfeed inventory engine
///
/// Polls a published spreadsheet CSV export of parking and storage units,
/// normalizes it into a unit registry and keeps the registry fresh for the
/// floor-plan display.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "planfeed",
    version,
    about = "Ingest live parking/storage inventory feeds into a floor-plan unit registry",
    long_about = "Polls a published spreadsheet CSV export of parking spots and storage units, \
                  normalizes identifiers, statuses, areas and prices into a unit registry, \
                  resolves pairing and storage-link relationships, and replaces the active \
                  registry only when a fetched snapshot is fresher than the current watermark."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the polling loop against the published feed (main command)
    Watch(WatchArgs),
    /// Fetch or read the feed once and dump the parsed registry
    Inspect(InspectArgs),
    /// Resolve one unit's relationships and aggregates from a single parse
    Details(DetailsArgs),
}

/// Arguments for the watch command
#[derive(Debug, Clone, Parser)]
pub struct WatchArgs {
    /// URL of the published CSV export
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: String,

    /// Layout of the published feed
    ///
    /// `per-row` expects a flat header with a per-row update column;
    /// `header-global` expects the first header cell to hold one global
    /// update timestamp with all other columns shifted right by one.
    #[arg(long = "shape", value_enum, default_value = "per-row")]
    pub shape: FeedShape,

    /// Interval between refresh cycles in milliseconds
    #[arg(long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Location of the persisted freshness watermark
    ///
    /// Defaults to a file under the user config directory. The watermark
    /// survives restarts so a transient fetch failure after a reload cannot
    /// regress the display to an older snapshot.
    #[arg(long = "watermark-path", value_name = "PATH")]
    pub watermark_path: Option<PathBuf>,

    /// Logging verbosity (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl WatchArgs {
    /// Build the engine configuration from CLI arguments
    pub fn to_config(&self) -> Config {
        let defaults = Config::default();
        Config {
            feed_url: self.url.clone(),
            feed_shape: self.shape,
            refresh_interval_ms: self.interval_ms.unwrap_or(defaults.refresh_interval_ms),
            request_timeout_secs: defaults.request_timeout_secs,
            watermark_path: self.watermark_path.clone(),
        }
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Feed source: an http(s) URL or a local CSV file path
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Layout of the published feed
    #[arg(long = "shape", value_enum, default_value = "per-row")]
    pub shape: FeedShape,

    /// Logging verbosity (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

/// Arguments for the details command
#[derive(Debug, Clone, Parser)]
pub struct DetailsArgs {
    /// Feed source: an http(s) URL or a local CSV file path
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Unit identifier in any accepted spelling (`P001`, `p1`, `к12`, `5`)
    #[arg(value_name = "UNIT_ID")]
    pub unit_id: String,

    /// Layout of the published feed
    #[arg(long = "shape", value_enum, default_value = "per-row")]
    pub shape: FeedShape,

    /// Logging verbosity (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

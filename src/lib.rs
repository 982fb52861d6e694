//! Planfeed Library
//!
//! A Rust library for ingesting live parking and storage unit inventory data
//! from spreadsheet CSV exports into a normalized floor-plan unit registry.
//!
//! This library provides tools for:
//! - Parsing permissively-quoted CSV feeds maintained by hand in a spreadsheet
//! - Resolving free-text column headers to semantic fields with keyword matching
//! - Normalizing unit identifiers, statuses, prices, areas and timestamps
//! - Reconciling pairing and storage-link relationships between units
//! - Gating snapshot replacement on a durable freshness watermark
//! - Running a token-serialized polling loop against the published feed

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod controller;
    pub mod models;
    pub mod services {
        pub mod feed_parser;
        pub mod refresh_engine;
        pub mod unit_registry;
    }
    pub mod adapters {
        pub mod presentation;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{UnitKind, UnitRecord, UnitStatus};
pub use app::services::unit_registry::UnitRegistry;
pub use config::Config;

/// Result type alias for feed processing
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for feed ingestion and registry operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Feed could not be fetched over HTTP
    #[error("Feed fetch error: {message}")]
    FeedFetch {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Feed content could not be interpreted
    #[error("Feed format error: {message}")]
    FeedFormat { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Watermark store read/write failure
    #[error("Watermark store error: {message}")]
    WatermarkStore {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Identifier does not normalize to a recognized unit family
    #[error("Invalid unit identifier: '{id}'")]
    InvalidUnitId { id: String },

    /// Identifier is valid but absent from the active registry
    #[error("Unit not found in registry: {id}")]
    UnknownUnit { id: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a feed fetch error with an underlying transport cause
    pub fn feed_fetch(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::FeedFetch {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a feed fetch error without a transport cause (e.g. non-OK status)
    pub fn feed_status(message: impl Into<String>) -> Self {
        Self::FeedFetch {
            message: message.into(),
            source: None,
        }
    }

    /// Create a feed format error
    pub fn feed_format(message: impl Into<String>) -> Self {
        Self::FeedFormat {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a watermark store error
    pub fn watermark_store(message: impl Into<String>, source: Option<std::io::Error>) -> Self {
        Self::WatermarkStore {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid unit identifier error
    pub fn invalid_unit_id(id: impl Into<String>) -> Self {
        Self::InvalidUnitId { id: id.into() }
    }

    /// Create an unknown unit error
    pub fn unknown_unit(id: impl Into<String>) -> Self {
        Self::UnknownUnit { id: id.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::FeedFetch {
            message: "Feed request failed".to_string(),
            source: Some(error),
        }
    }
}

//! Durable freshness watermark
//!
//! A single epoch-millisecond value persisted across process restarts, so a
//! restart followed by a transient fetch failure does not regress the viewer
//! to an older snapshot. The store is best-effort: an absent or unwritable
//! file degrades to an in-memory watermark.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::{Error, Result};

/// File-backed store for the freshness watermark
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    /// Create a store at the given path; nothing is touched until the first
    /// save
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the persisted watermark
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted watermark, returning 0 when the store is absent or
    /// unreadable
    pub fn load(&self) -> i64 {
        match fs::read_to_string(&self.path) {
            Ok(text) => match text.trim().parse::<i64>() {
                Ok(watermark) => watermark,
                Err(_) => {
                    warn!(
                        "watermark store {} held non-numeric content; starting from 0",
                        self.path.display()
                    );
                    0
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => {
                warn!(
                    "failed to read watermark store {}: {}; starting from 0",
                    self.path.display(),
                    e
                );
                0
            }
        }
    }

    /// Persist the watermark, creating parent directories as needed
    pub fn save(&self, watermark: i64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::watermark_store(
                    format!("failed to create {}", parent.display()),
                    Some(e),
                )
            })?;
        }

        fs::write(&self.path, watermark.to_string()).map_err(|e| {
            Error::watermark_store(format!("failed to write {}", self.path.display()), Some(e))
        })
    }
}

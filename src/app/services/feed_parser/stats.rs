//! Parsing statistics and result structures
//!
//! Rejected rows are expected in a hand-edited sheet (blank separator rows,
//! notes typed below the data), so they are counted rather than reported as
//! errors.

use crate::app::services::unit_registry::Snapshot;

/// Parsing result: the snapshot plus basic statistics
#[derive(Debug)]
pub struct ParseResult {
    /// Parsed snapshot, possibly empty
    pub snapshot: Snapshot,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Number of unit records successfully parsed
    pub units_parsed: usize,

    /// Number of rows dropped for an unrecognizable identifier
    pub rows_skipped: usize,

    /// Number of rows that replaced an earlier row with the same identifier
    pub duplicates_replaced: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_rows: 0,
            units_parsed: 0,
            rows_skipped: 0,
            duplicates_replaced: 0,
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.units_parsed as f64 / self.total_rows as f64) * 100.0
        }
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}

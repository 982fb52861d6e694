//! CSV feed parser for the published unit inventory sheet
//!
//! This module turns the raw text of a spreadsheet CSV export into a
//! [`Snapshot`](crate::app::services::unit_registry::Snapshot): a normalized
//! unit registry plus the snapshot's freshness timestamp. The sheet is edited
//! by hand, so every layer degrades instead of failing: malformed quoting is
//! tolerated, unrecognized headers fall back to fixed positions, and fields
//! that fail normalization become "not available" rather than errors.
//!
//! ## Architecture
//!
//! - [`tabular`] - Quote-aware splitting of raw text into rows of fields
//! - [`column_map`] - Header keyword matching with positional fallback
//! - [`field_parsers`] - Normalizers for numbers, statuses, identifiers and
//!   timestamps
//! - [`record_parser`] - Individual row processing
//! - [`parser`] - Parsing orchestration per feed shape
//! - [`stats`] - Parsing statistics and result structures

pub mod column_map;
pub mod field_parsers;
pub mod parser;
pub mod record_parser;
pub mod stats;
pub mod tabular;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_map::ColumnMap;
pub use parser::FeedParser;
pub use stats::{ParseResult, ParseStats};

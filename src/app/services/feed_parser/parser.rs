//! Parsing orchestration per feed shape
//!
//! Drives the full pipeline: raw text to rows, header resolution, row
//! normalization, registry assembly and snapshot-timestamp extraction.

use tracing::{debug, info};

use crate::app::services::unit_registry::{Snapshot, UnitRegistry};
use crate::config::FeedShape;

use super::column_map::ColumnMap;
use super::field_parsers::parse_timestamp;
use super::record_parser::parse_unit_record;
use super::stats::{ParseResult, ParseStats};

/// Parser for the published unit inventory feed.
///
/// The parser is total: any text input produces a result. Snapshots with no
/// units are representable and left to the freshness gate to reject.
#[derive(Debug, Clone)]
pub struct FeedParser {
    shape: FeedShape,
}

impl FeedParser {
    /// Create a parser for the configured feed shape
    pub fn new(shape: FeedShape) -> Self {
        Self { shape }
    }

    /// Parse raw feed text into a snapshot with statistics.
    ///
    /// Row 0 is always header/metadata; data begins at row 1. Duplicate
    /// identifiers within one snapshot resolve last-row-wins. The snapshot
    /// timestamp is the per-row maximum in the flat shape and the single
    /// header-cell value in the header-global shape.
    pub fn parse(&self, text: &str) -> ParseResult {
        let rows = super::tabular::parse_rows(text);
        let mut stats = ParseStats::new();
        let mut registry = UnitRegistry::new();

        let Some((header, data_rows)) = rows.split_first() else {
            debug!("feed text produced no rows");
            return ParseResult {
                snapshot: Snapshot {
                    registry,
                    updated_at: None,
                },
                stats,
            };
        };

        let map = ColumnMap::resolve(header, self.shape);

        let header_updated_at = match self.shape {
            FeedShape::HeaderGlobal => {
                parse_timestamp(header.first().map(String::as_str).unwrap_or(""))
            }
            FeedShape::PerRow => None,
        };

        let mut max_row_updated: Option<i64> = None;
        for row in data_rows {
            stats.total_rows += 1;

            match parse_unit_record(row, &map) {
                Some(record) => {
                    if let Some(ts) = record.updated_at {
                        max_row_updated = Some(max_row_updated.map_or(ts, |m| m.max(ts)));
                    }
                    if registry.insert(record).is_some() {
                        stats.duplicates_replaced += 1;
                    }
                    stats.units_parsed += 1;
                }
                None => {
                    stats.rows_skipped += 1;
                    debug!("skipped row {} without a recognizable identifier", stats.total_rows);
                }
            }
        }

        let updated_at = match self.shape {
            FeedShape::PerRow => max_row_updated,
            FeedShape::HeaderGlobal => header_updated_at,
        };

        info!(
            "parsed {} units from {} rows ({} skipped)",
            stats.units_parsed, stats.total_rows, stats.rows_skipped
        );

        ParseResult {
            snapshot: Snapshot {
                registry,
                updated_at,
            },
            stats,
        }
    }
}

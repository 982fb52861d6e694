//! Individual data-row processing
//!
//! One feed row becomes one [`UnitRecord`]. A row whose identifier does not
//! normalize to a recognized unit family is rejected by returning `None`;
//! every other field degrades to "not available" on bad input.

use crate::app::models::{UnitKind, UnitRecord};

use super::column_map::ColumnMap;
use super::field_parsers::{normalize_unit_id, parse_number, parse_status, parse_timestamp};

/// Parse a single data row into a unit record.
///
/// Returns `None` when the identifier cell is blank or unrecognizable, which
/// drops the row silently.
pub fn parse_unit_record(row: &[String], map: &ColumnMap) -> Option<UnitRecord> {
    let id = normalize_unit_id(map.field(row, map.id))?;
    let kind = UnitKind::from_canonical_id(&id)?;

    let (status, status_label) = parse_status(map.field(row, map.status));

    // relationship cells that fail normalization are treated as undeclared
    let pair_id = normalize_unit_id(map.field(row, map.pair));
    let storage_id = normalize_unit_id(map.field(row, map.storage));

    Some(UnitRecord {
        id,
        kind,
        status,
        status_label,
        pair_id,
        storage_id,
        spot_area: parse_number(map.field(row, map.spot_area)),
        storage_area: parse_number(map.field(row, map.storage_area)),
        total_area: parse_number(map.field(row, map.total_area)),
        price_per_sqm: parse_number(map.field(row, map.price)),
        updated_at: parse_timestamp(map.field(row, map.updated)),
    })
}

//! Header resolution for the hand-maintained sheet
//!
//! Column names in the published export drift over time (renames, added
//! whitespace, mixed Russian/English), so semantic fields are located by
//! keyword-fragment matching against normalized header text, with fixed
//! positional fallbacks when nothing matches.

use crate::config::FeedShape;
use crate::constants::{fallback_columns, header_keywords};

use super::field_parsers::normalize_text;

/// Resolved column index for each semantic field of the feed.
///
/// `None` means the column is absent from this sheet revision; reads through
/// [`ColumnMap::field`] then yield a blank cell. In the header-global shape
/// every index is offset by one, past the leading timestamp cell; the per-row
/// update column only exists in the flat shape.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub id: Option<usize>,
    pub status: Option<usize>,
    pub pair: Option<usize>,
    pub storage: Option<usize>,
    pub spot_area: Option<usize>,
    pub storage_area: Option<usize>,
    pub total_area: Option<usize>,
    pub price: Option<usize>,
    pub updated: Option<usize>,
}

impl ColumnMap {
    /// Resolve semantic columns against a header row.
    ///
    /// Keyword matching runs first, in a fixed field order, and each match
    /// claims its cell so later fields cannot take it; the specific area
    /// fields run before the storage-number field, whose generic `кладов`
    /// fragment would otherwise capture the storage-area column. Fields left
    /// unmatched fall back to fixed positions, except where the fallback
    /// position was claimed by a match; such columns are treated as absent
    /// from this sheet revision rather than reading another field's data.
    pub fn resolve(header: &[String], shape: FeedShape) -> Self {
        fn claim_match(cells: &[String], claimed: &mut [bool], keywords: &[&str]) -> Option<usize> {
            for (index, cell) in cells.iter().enumerate() {
                if claimed[index] {
                    continue;
                }
                if keywords.iter().any(|k| cell.contains(k)) {
                    claimed[index] = true;
                    return Some(index);
                }
            }
            None
        }

        fn fall_back(claimed: &[bool], resolved: Option<usize>, fallback: usize) -> Option<usize> {
            if resolved.is_some() {
                return resolved;
            }
            match claimed.get(fallback) {
                Some(true) => None,
                // beyond the header width: short rows read as blank cells
                _ => Some(fallback),
            }
        }

        let offset = match shape {
            FeedShape::PerRow => 0,
            FeedShape::HeaderGlobal => 1,
        };

        let cells: Vec<String> = header.iter().skip(offset).map(|c| normalize_text(c)).collect();
        let mut claimed = vec![false; cells.len()];

        let status = claim_match(&cells, &mut claimed, header_keywords::STATUS);
        let total_area = claim_match(&cells, &mut claimed, header_keywords::TOTAL_AREA);
        let storage_area = claim_match(&cells, &mut claimed, header_keywords::STORAGE_AREA);
        let spot_area = claim_match(&cells, &mut claimed, header_keywords::SPOT_AREA);
        let price = claim_match(&cells, &mut claimed, header_keywords::PRICE);
        let updated = match shape {
            FeedShape::PerRow => claim_match(&cells, &mut claimed, header_keywords::UPDATED),
            FeedShape::HeaderGlobal => None,
        };
        let pair = claim_match(&cells, &mut claimed, header_keywords::PAIR);
        let storage = claim_match(&cells, &mut claimed, header_keywords::STORAGE);
        let id = claim_match(&cells, &mut claimed, header_keywords::ID);

        let status = fall_back(&claimed, status, fallback_columns::STATUS);
        let total_area = fall_back(&claimed, total_area, fallback_columns::TOTAL_AREA);
        let storage_area = fall_back(&claimed, storage_area, fallback_columns::STORAGE_AREA);
        let spot_area = fall_back(&claimed, spot_area, fallback_columns::SPOT_AREA);
        let price = fall_back(&claimed, price, fallback_columns::PRICE);
        let updated = match shape {
            FeedShape::PerRow => fall_back(&claimed, updated, fallback_columns::UPDATED),
            FeedShape::HeaderGlobal => None,
        };
        let pair = fall_back(&claimed, pair, fallback_columns::PAIR);
        let storage = fall_back(&claimed, storage, fallback_columns::STORAGE);
        let id = fall_back(&claimed, id, fallback_columns::ID);

        let shift = |index: Option<usize>| index.map(|i| i + offset);

        Self {
            id: shift(id),
            status: shift(status),
            pair: shift(pair),
            storage: shift(storage),
            spot_area: shift(spot_area),
            storage_area: shift(storage_area),
            total_area: shift(total_area),
            price: shift(price),
            updated: shift(updated),
        }
    }

    /// Fetch a field from a data row; absent columns and short rows read as
    /// blank cells
    pub fn field<'a>(&self, row: &'a [String], index: Option<usize>) -> &'a str {
        index
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

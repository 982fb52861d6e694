//! Data models for floor-plan unit inventory
//!
//! This module contains the core data structures describing parking spots and
//! storage units as published by the inventory sheet, plus the display
//! formatting shared by every consumer of the registry.

use crate::constants::{MISSING_VALUE_DISPLAY, PRICE_GROUP_SEPARATOR, status_labels};
use serde::{Deserialize, Serialize};

// =============================================================================
// Unit Classification
// =============================================================================

/// Family of a tracked unit, derived from its canonical identifier prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Parking spot (`P###`)
    Parking,

    /// Storage compartment (`K####`)
    Storage,
}

impl UnitKind {
    /// Classify a canonical identifier by its prefix character.
    ///
    /// Returns `None` for identifiers outside the two known families; those
    /// never enter the registry.
    pub fn from_canonical_id(id: &str) -> Option<Self> {
        match id.chars().next() {
            Some('P') => Some(Self::Parking),
            Some('K') => Some(Self::Storage),
            _ => None,
        }
    }
}

/// Sale status of a unit.
///
/// Always resolvable: free text that matches none of the status keyword sets
/// falls back to [`UnitStatus::Available`], which is a read-only display
/// default rather than a business assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Available,
    Reserved,
    Sold,
}

impl UnitStatus {
    /// Canonical display label in the language of the feed
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => status_labels::AVAILABLE,
            Self::Reserved => status_labels::RESERVED,
            Self::Sold => status_labels::SOLD,
        }
    }

    /// Stable lowercase name, used by the presentation layer to key fill
    /// colors and CSS classes on the SVG plan
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
        }
    }
}

// =============================================================================
// Unit Record
// =============================================================================

/// One parking spot or storage unit as parsed from a single feed row.
///
/// Records are created fresh on every accepted snapshot and never mutated in
/// place; the whole registry is swapped atomically so readers observe either
/// the old or the new snapshot, never a mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Canonical identifier (`P###` / `K####`), the registry key
    pub id: String,

    /// Unit family derived from the identifier prefix
    pub kind: UnitKind,

    /// Normalized sale status
    pub status: UnitStatus,

    /// Display label: the canonical label when the source text was
    /// recognized, otherwise the raw source text
    pub status_label: String,

    /// Linked parking unit sold/shown as a set with this one.
    ///
    /// The sheet declares the pairing on one side only; resolution treats it
    /// as symmetric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_id: Option<String>,

    /// Storage unit associated with this parking spot (parking rows only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_id: Option<String>,

    /// Area of the parking spot itself, in m²
    pub spot_area: Option<f64>,

    /// Area of the linked storage unit (on parking rows) or of the storage
    /// unit itself (on storage rows), in m²
    pub storage_area: Option<f64>,

    /// Combined area as published by the sheet, in m²
    pub total_area: Option<f64>,

    /// Price per m²
    pub price_per_sqm: Option<f64>,

    /// Per-row freshness timestamp in epoch milliseconds (flat feed shape
    /// only; the other shape carries one global timestamp in its header)
    pub updated_at: Option<i64>,
}

impl UnitRecord {
    /// Area this unit contributes when displayed on its own.
    ///
    /// Storage units publish their area in the storage-area column, falling
    /// back to the combined column when it is blank.
    pub fn own_area(&self) -> Option<f64> {
        match self.kind {
            UnitKind::Storage => self.storage_area.or(self.total_area),
            UnitKind::Parking => self.spot_area,
        }
    }
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Format a price as a locale-grouped integer string (`1234567.0` →
/// `1 234 567` with non-breaking spaces), or the missing-value placeholder.
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => group_thousands(v.round() as i64),
        _ => MISSING_VALUE_DISPLAY.to_string(),
    }
}

/// Format an area with one decimal place, or the missing-value placeholder
pub fn format_area(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}", v),
        _ => MISSING_VALUE_DISPLAY.to_string(),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    let first_group = match digits.len() % 3 {
        0 => 3,
        n => n,
    };

    for (i, ch) in digits.chars().enumerate() {
        if i == first_group || (i > first_group && (i - first_group) % 3 == 0) {
            grouped.push(PRICE_GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    grouped
}

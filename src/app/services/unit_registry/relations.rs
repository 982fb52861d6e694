//! Relationship resolution between paired parking spots and storage units
//!
//! The sheet declares pairings and storage links on one side only; resolution
//! treats them as symmetric so that selecting either end of a relationship
//! highlights the whole set. Aggregation over the set skips missing figures
//! and avoids counting a storage unit's area twice when it is displayed next
//! to the parking spot that links it.

use std::collections::HashSet;

use crate::app::models::{UnitKind, UnitStatus, format_area, format_price};
use crate::app::services::feed_parser::field_parsers::{normalize_unit_id, sum_available};

use super::UnitRegistry;

/// Aggregates over a resolved unit set
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSetSummary {
    /// Combined area in m², `None` when no unit contributed one
    pub total_area: Option<f64>,

    /// Combined price, `None` when no unit had both an area and a unit price
    pub total_price: Option<f64>,
}

/// Details payload handed to the presentation layer on selection or hover
#[derive(Debug, Clone)]
pub struct UnitDetails {
    /// Canonical identifier of the looked-up unit
    pub id: String,

    /// Status of the looked-up unit
    pub status: UnitStatus,

    /// Display label for the status
    pub status_label: String,

    /// Full relation closure in first-discovery order, including the unit
    /// itself
    pub related: Vec<String>,

    /// Combined area of the closure in m²
    pub total_area: Option<f64>,

    /// Combined price of the closure
    pub total_price: Option<f64>,

    /// Formatted area, one decimal place or the missing placeholder
    pub area_display: String,

    /// Formatted price, locale-grouped integer or the missing placeholder
    pub price_display: String,
}

impl UnitRegistry {
    /// Resolve the closure of identifiers related to `id`.
    ///
    /// For a parking spot: itself, its pair partner (declared on either
    /// side), and every storage unit linked from the pairing set. For a
    /// storage unit: itself, every parking spot linking it expanded to its
    /// own pairing set, and every storage unit linked from that set. The
    /// result is deduplicated and ordered by first discovery; an identifier
    /// without a record resolves to an empty closure.
    pub fn related_units(&self, id: &str) -> Vec<String> {
        let Some(canonical) = normalize_unit_id(id) else {
            return Vec::new();
        };
        let Some(record) = self.get(&canonical) else {
            return Vec::new();
        };

        let mut related = Vec::new();
        push_unique(&mut related, canonical.clone());

        match record.kind {
            UnitKind::Parking => {
                if let Some(partner) = self.pair_partner(&canonical) {
                    push_unique(&mut related, partner);
                }
            }
            UnitKind::Storage => {
                let linked: Vec<String> = self
                    .units()
                    .filter(|u| {
                        u.kind == UnitKind::Parking
                            && u.storage_id.as_deref() == Some(canonical.as_str())
                    })
                    .map(|u| u.id.clone())
                    .collect();

                for parking in linked {
                    if let Some(partner) = self.pair_partner(&parking) {
                        push_unique(&mut related, parking);
                        push_unique(&mut related, partner);
                    } else {
                        push_unique(&mut related, parking);
                    }
                }
            }
        }

        self.extend_with_storage_links(&mut related);
        related
    }

    /// Aggregate areas and prices over a resolved unit set.
    ///
    /// Storage units contribute their own area. Parking spots contribute
    /// their spot area plus their linked storage area, unless that storage
    /// unit is itself part of the set. Price terms multiply each unit's
    /// contributing area by its own per-m² price and skip units missing
    /// either figure.
    pub fn set_summary(&self, ids: &[String]) -> UnitSetSummary {
        let in_set: HashSet<&str> = ids.iter().map(String::as_str).collect();

        let mut areas = Vec::with_capacity(ids.len());
        let mut price_terms = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(record) = self.get(id) else {
                continue;
            };

            let area = match record.kind {
                UnitKind::Storage => record.own_area(),
                UnitKind::Parking => {
                    // the linked storage only drops out when it contributes
                    // its own area to the set
                    let separate_storage = record
                        .storage_id
                        .as_deref()
                        .is_some_and(|s| in_set.contains(s) && self.contains(s));
                    if separate_storage {
                        record.spot_area
                    } else {
                        sum_available([record.spot_area, record.storage_area])
                    }
                }
            };

            areas.push(area);
            price_terms.push(match (area, record.price_per_sqm) {
                (Some(a), Some(p)) => Some(a * p),
                _ => None,
            });
        }

        UnitSetSummary {
            total_area: sum_available(areas),
            total_price: sum_available(price_terms),
        }
    }

    /// Build the details payload for one unit, or `None` when the identifier
    /// has no record
    pub fn details(&self, id: &str) -> Option<UnitDetails> {
        let canonical = normalize_unit_id(id)?;
        let record = self.get(&canonical)?;

        let related = self.related_units(&canonical);
        let summary = self.set_summary(&related);

        Some(UnitDetails {
            id: canonical,
            status: record.status,
            status_label: record.status_label.clone(),
            area_display: format_area(summary.total_area),
            price_display: format_price(summary.total_price),
            total_area: summary.total_area,
            total_price: summary.total_price,
            related,
        })
    }

    /// Pair partner of a parking identifier, found from either side of the
    /// declaration
    fn pair_partner(&self, id: &str) -> Option<String> {
        if let Some(record) = self.get(id) {
            if let Some(pair) = &record.pair_id {
                return Some(pair.clone());
            }
        }

        self.units()
            .find(|u| u.pair_id.as_deref() == Some(id))
            .map(|u| u.id.clone())
    }

    /// Append every storage identifier linked from parking units already in
    /// the set
    fn extend_with_storage_links(&self, related: &mut Vec<String>) {
        let parked: Vec<String> = related
            .iter()
            .filter(|id| {
                self.get(id)
                    .is_some_and(|u| u.kind == UnitKind::Parking && u.storage_id.is_some())
            })
            .cloned()
            .collect();

        for parking in parked {
            if let Some(storage) = self.get(&parking).and_then(|u| u.storage_id.clone()) {
                push_unique(related, storage);
            }
        }
    }
}

fn push_unique(set: &mut Vec<String>, id: String) {
    if !set.iter().any(|existing| *existing == id) {
        set.push(id);
    }
}

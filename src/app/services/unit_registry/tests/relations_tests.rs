//! Tests for relationship closure and set aggregation

use std::collections::HashSet;

use super::{relationship_registry, unit};
use crate::app::models::UnitRecord;
use crate::app::services::unit_registry::UnitRegistry;

fn as_set(ids: &[String]) -> HashSet<&str> {
    ids.iter().map(String::as_str).collect()
}

#[test]
fn parking_closure_includes_pair_and_storage() {
    let registry = relationship_registry();
    let related = registry.related_units("P001");

    assert_eq!(related[0], "P001");
    assert_eq!(as_set(&related), HashSet::from(["P001", "P002", "K0001"]));
}

#[test]
fn pairing_resolves_from_both_sides() {
    // the pairing is declared on P001 only
    let registry = relationship_registry();

    let from_declaring = registry.related_units("P001");
    let from_declared = registry.related_units("P002");

    assert_eq!(as_set(&from_declaring), as_set(&from_declared));
    assert_eq!(from_declared[0], "P002");
}

#[test]
fn storage_closure_expands_through_linking_parking() {
    let registry = relationship_registry();
    let related = registry.related_units("K0001");

    assert_eq!(related[0], "K0001");
    assert_eq!(as_set(&related), HashSet::from(["K0001", "P001", "P002"]));
}

#[test]
fn standalone_units_resolve_to_themselves() {
    let registry = relationship_registry();
    assert_eq!(registry.related_units("P003"), vec!["P003"]);
    assert_eq!(registry.related_units("K0002"), vec!["K0002"]);
}

#[test]
fn lookup_accepts_alternate_spellings() {
    let registry = relationship_registry();
    let related = registry.related_units("р 1");
    assert_eq!(related[0], "P001");
}

#[test]
fn unknown_identifier_resolves_to_empty_closure() {
    let registry = relationship_registry();
    assert!(registry.related_units("P099").is_empty());
    assert!(registry.related_units("мусор").is_empty());
}

#[test]
fn set_area_does_not_double_count_displayed_storage() {
    let registry = relationship_registry();
    let related = registry.related_units("P001");
    let summary = registry.set_summary(&related);

    // P001 contributes its spot only, because K0001 is in the set with its
    // own area; P002 contributes its spot
    assert_eq!(summary.total_area, Some(10.0 + 11.5 + 4.0));
}

#[test]
fn lone_parking_includes_linked_storage_area() {
    let mut registry = UnitRegistry::new();
    registry.insert(UnitRecord {
        storage_id: Some("K0009".to_string()),
        spot_area: Some(10.0),
        storage_area: Some(4.0),
        ..unit("P001")
    });

    // the linked storage unit has no record of its own, so the parking row's
    // storage-area figure counts
    let summary = registry.set_summary(&["P001".to_string(), "K0009".to_string()]);
    assert_eq!(summary.total_area, Some(14.0));
}

#[test]
fn set_price_multiplies_contributing_area_by_own_rate() {
    let registry = relationship_registry();
    let related = registry.related_units("P001");
    let summary = registry.set_summary(&related);

    // P001: 10.0 × 5000, P002: 11.5 × 5000, K0001: 4.0 × 8000
    assert_eq!(summary.total_price, Some(50_000.0 + 57_500.0 + 32_000.0));
}

#[test]
fn units_missing_a_figure_are_skipped_in_price() {
    let registry = relationship_registry();

    // K0002 has an area but no rate
    let summary = registry.set_summary(&["P003".to_string(), "K0002".to_string()]);
    assert_eq!(summary.total_price, Some(12.0 * 4500.0));
    assert_eq!(summary.total_area, Some(12.0 + 3.5));
}

#[test]
fn set_with_no_complete_figures_has_missing_price() {
    let registry = relationship_registry();
    let summary = registry.set_summary(&["K0002".to_string()]);
    assert_eq!(summary.total_price, None);
}

#[test]
fn details_carries_formatted_aggregates() {
    let registry = relationship_registry();
    let details = registry.details("P003").unwrap();

    assert_eq!(details.id, "P003");
    assert_eq!(details.related, vec!["P003"]);
    assert_eq!(details.area_display, "12.0");
    assert_eq!(details.price_display, "54\u{a0}000");
}

#[test]
fn details_for_unknown_identifier_is_none() {
    let registry = relationship_registry();
    assert!(registry.details("P099").is_none());
    assert!(registry.details("###").is_none());
}

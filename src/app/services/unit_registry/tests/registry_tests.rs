//! Tests for registry assembly and iteration order

use super::{relationship_registry, unit};
use crate::app::models::UnitStatus;
use crate::app::services::unit_registry::UnitRegistry;

#[test]
fn insert_and_lookup() {
    let mut registry = UnitRegistry::new();
    assert!(registry.is_empty());

    registry.insert(unit("P001"));
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("P001"));
    assert!(!registry.contains("P002"));
    assert!(registry.get("P001").is_some());
}

#[test]
fn duplicate_insert_replaces_and_reports() {
    let mut registry = UnitRegistry::new();
    registry.insert(unit("P001"));

    let mut updated = unit("P001");
    updated.status = UnitStatus::Sold;
    let previous = registry.insert(updated);

    assert!(previous.is_some());
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("P001").unwrap().status, UnitStatus::Sold);
}

#[test]
fn iteration_follows_first_insertion_order() {
    let mut registry = UnitRegistry::new();
    registry.insert(unit("P002"));
    registry.insert(unit("K0001"));
    registry.insert(unit("P001"));

    // replacing a record keeps its original position
    let mut replacement = unit("K0001");
    replacement.status = UnitStatus::Reserved;
    registry.insert(replacement);

    let ids: Vec<&str> = registry.ids().collect();
    assert_eq!(ids, vec!["P002", "K0001", "P001"]);
}

#[test]
fn fixture_registry_is_complete() {
    let registry = relationship_registry();
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.units().count(), 5);
}

//! Test fixtures for registry and relationship tests

use crate::app::models::{UnitKind, UnitRecord, UnitStatus};

use super::UnitRegistry;

// Test modules
mod registry_tests;
mod relations_tests;

/// Build a record with everything optional left empty
pub fn unit(id: &str) -> UnitRecord {
    let kind = UnitKind::from_canonical_id(id).expect("test identifiers are canonical");
    UnitRecord {
        id: id.to_string(),
        kind,
        status: UnitStatus::Available,
        status_label: UnitStatus::Available.label().to_string(),
        pair_id: None,
        storage_id: None,
        spot_area: None,
        storage_area: None,
        total_area: None,
        price_per_sqm: None,
        updated_at: None,
    }
}

/// Registry exercising the full relationship surface:
/// P001 ⇄ P002 paired (declared on P001), P001 → K0001 linked,
/// P003 standalone, K0002 unlinked storage.
pub fn relationship_registry() -> UnitRegistry {
    let mut registry = UnitRegistry::new();

    registry.insert(UnitRecord {
        pair_id: Some("P002".to_string()),
        storage_id: Some("K0001".to_string()),
        spot_area: Some(10.0),
        storage_area: Some(4.0),
        price_per_sqm: Some(5000.0),
        ..unit("P001")
    });
    registry.insert(UnitRecord {
        spot_area: Some(11.5),
        price_per_sqm: Some(5000.0),
        status: UnitStatus::Reserved,
        status_label: UnitStatus::Reserved.label().to_string(),
        ..unit("P002")
    });
    registry.insert(UnitRecord {
        spot_area: Some(12.0),
        price_per_sqm: Some(4500.0),
        ..unit("P003")
    });
    registry.insert(UnitRecord {
        storage_area: Some(4.0),
        price_per_sqm: Some(8000.0),
        ..unit("K0001")
    });
    registry.insert(UnitRecord {
        storage_area: Some(3.5),
        ..unit("K0002")
    });

    registry
}

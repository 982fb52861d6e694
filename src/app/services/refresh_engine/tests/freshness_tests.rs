//! Tests for the freshness gate decision table

use crate::app::services::refresh_engine::freshness::{FreshnessGate, GateDecision};
use crate::app::services::unit_registry::{Snapshot, UnitRegistry};
use crate::app::services::unit_registry::tests::unit;

fn snapshot(updated_at: Option<i64>) -> Snapshot {
    let mut registry = UnitRegistry::new();
    registry.insert(unit("P001"));
    Snapshot {
        registry,
        updated_at,
    }
}

fn empty_snapshot() -> Snapshot {
    Snapshot {
        registry: UnitRegistry::new(),
        updated_at: Some(9_999),
    }
}

#[test]
fn initial_parse_is_accepted_regardless_of_timestamp() {
    let gate = FreshnessGate::new(1_000);
    assert_eq!(
        gate.evaluate(&snapshot(Some(500)), true),
        GateDecision::Apply
    );
}

#[test]
fn missing_timestamp_is_always_fresh() {
    let mut gate = FreshnessGate::new(0);
    gate.commit(Some(1_000));

    assert_eq!(gate.evaluate(&snapshot(None), false), GateDecision::Apply);
    assert_eq!(gate.evaluate(&snapshot(Some(0)), false), GateDecision::Apply);
}

#[test]
fn newer_timestamp_is_accepted() {
    let gate = FreshnessGate::new(1_000);
    assert_eq!(
        gate.evaluate(&snapshot(Some(1_001)), false),
        GateDecision::Apply
    );
}

#[test]
fn equal_or_older_timestamp_is_stale() {
    let gate = FreshnessGate::new(1_000);
    assert_eq!(
        gate.evaluate(&snapshot(Some(1_000)), false),
        GateDecision::Stale
    );
    assert_eq!(
        gate.evaluate(&snapshot(Some(500)), false),
        GateDecision::Stale
    );
}

#[test]
fn empty_snapshots_are_never_accepted() {
    let gate = FreshnessGate::new(0);
    assert_eq!(gate.evaluate(&empty_snapshot(), true), GateDecision::Empty);
    assert_eq!(gate.evaluate(&empty_snapshot(), false), GateDecision::Empty);
}

#[test]
fn commit_advances_watermark_only_for_positive_timestamps() {
    let mut gate = FreshnessGate::new(0);
    assert!(!gate.has_data());

    assert!(!gate.commit(None));
    assert_eq!(gate.watermark(), 0);
    assert!(gate.has_data());

    assert!(gate.commit(Some(2_000)));
    assert_eq!(gate.watermark(), 2_000);
}

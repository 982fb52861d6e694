//! Tests for token serialization, registry swapping and failure absorption

use chrono::NaiveDate;
use tempfile::tempdir;

use super::{global_snapshot, legacy_snapshot, test_engine};
use crate::app::services::refresh_engine::RefreshOutcome;
use crate::config::FeedShape;

fn millis(y: i32, mo: u32, d: u32, h: u32) -> i64 {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

#[test]
fn first_snapshot_is_accepted_without_timestamp() {
    let dir = tempdir().unwrap();
    let engine = test_engine(&dir, FeedShape::PerRow);

    let token = engine.issue_token();
    let result = legacy_snapshot(&["P001,Доступно,10,5000"]);
    let outcome = engine.apply_parse(token, result, true);

    assert_eq!(
        outcome,
        RefreshOutcome::Applied {
            units: 1,
            watermark: 0
        }
    );
    assert!(engine.has_data());
    assert!(!engine.load_error());
    assert!(engine.registry().contains("P001"));

    // nothing to persist when the feed carries no timestamps
    assert!(!dir.path().join("watermark").exists());
}

#[test]
fn stale_snapshot_keeps_held_registry() {
    let dir = tempdir().unwrap();
    let engine = test_engine(&dir, FeedShape::HeaderGlobal);

    let newer = global_snapshot("1/15/2030 12:00:00", &["P001,Доступно,10,5000"]);
    let outcome = engine.apply_parse(engine.issue_token(), newer, true);
    assert!(matches!(outcome, RefreshOutcome::Applied { .. }));

    let older = global_snapshot("1/15/2030 11:00:00", &["P001,Продано,10,5000"]);
    let outcome = engine.apply_parse(engine.issue_token(), older, false);

    assert_eq!(outcome, RefreshOutcome::NotFresh);
    assert!(!engine.load_error());
    assert_eq!(engine.watermark(), millis(2030, 1, 15, 12));

    let held = engine.registry();
    assert_eq!(
        held.get("P001").unwrap().status,
        crate::app::models::UnitStatus::Available
    );
}

#[test]
fn untimestamped_snapshot_replaces_timestamped_one() {
    let dir = tempdir().unwrap();
    let engine = test_engine(&dir, FeedShape::PerRow);

    let first = global_snapshot("1/15/2030 12:00:00", &["P001,Доступно,10,5000"]);
    engine.apply_parse(engine.issue_token(), first, true);

    let legacy = legacy_snapshot(&["P002,Бронь,12,6000"]);
    let outcome = engine.apply_parse(engine.issue_token(), legacy, false);

    assert!(matches!(outcome, RefreshOutcome::Applied { .. }));
    assert!(engine.registry().contains("P002"));
}

#[test]
fn empty_snapshot_flags_load_error_only_before_first_data() {
    let dir = tempdir().unwrap();
    let engine = test_engine(&dir, FeedShape::PerRow);

    let outcome = engine.apply_parse(engine.issue_token(), legacy_snapshot(&[]), true);
    assert_eq!(outcome, RefreshOutcome::EmptySnapshot);
    assert!(engine.load_error());
    assert!(!engine.has_data());

    let good = legacy_snapshot(&["P001,Доступно,10,5000"]);
    engine.apply_parse(engine.issue_token(), good, true);
    assert!(!engine.load_error());

    let outcome = engine.apply_parse(engine.issue_token(), legacy_snapshot(&[]), false);
    assert_eq!(outcome, RefreshOutcome::EmptySnapshot);
    assert!(!engine.load_error());
    assert!(engine.registry().contains("P001"));
}

#[test]
fn superseded_response_is_discarded_silently() {
    let dir = tempdir().unwrap();
    let engine = test_engine(&dir, FeedShape::HeaderGlobal);

    // two cycles in flight; the later-issued one completes first
    let early_token = engine.issue_token();
    let late_token = engine.issue_token();

    let newer = global_snapshot("1/15/2030 12:00:00", &["P001,Доступно,10,5000"]);
    let outcome = engine.apply_parse(late_token, newer, true);
    assert!(matches!(outcome, RefreshOutcome::Applied { .. }));

    let older = global_snapshot("1/15/2030 09:00:00", &["P001,Продано,10,5000"]);
    let outcome = engine.apply_parse(early_token, older, false);

    assert_eq!(outcome, RefreshOutcome::StaleToken);
    assert_eq!(engine.watermark(), millis(2030, 1, 15, 12));
    assert_eq!(
        engine.registry().get("P001").unwrap().status,
        crate::app::models::UnitStatus::Available
    );
}

#[test]
fn later_timestamp_wins_in_arrival_order_too() {
    let dir = tempdir().unwrap();
    let engine = test_engine(&dir, FeedShape::HeaderGlobal);

    let t1 = global_snapshot("1/15/2030 10:00:00", &["P001,Доступно,10,5000"]);
    engine.apply_parse(engine.issue_token(), t1, true);

    let t2 = global_snapshot("1/15/2030 12:00:00", &["P001,Бронь,10,5000"]);
    let outcome = engine.apply_parse(engine.issue_token(), t2, false);
    assert!(matches!(outcome, RefreshOutcome::Applied { .. }));

    // a re-fetch of the older publish arrives afterwards with a fresh token
    let t1_again = global_snapshot("1/15/2030 10:00:00", &["P001,Доступно,10,5000"]);
    let outcome = engine.apply_parse(engine.issue_token(), t1_again, false);

    assert_eq!(outcome, RefreshOutcome::NotFresh);
    assert_eq!(
        engine.registry().get("P001").unwrap().status,
        crate::app::models::UnitStatus::Reserved
    );
}

#[test]
fn fetch_failure_flags_load_error_only_before_first_data() {
    let dir = tempdir().unwrap();
    let engine = test_engine(&dir, FeedShape::PerRow);

    let outcome = engine.record_fetch_failure(engine.issue_token());
    assert_eq!(outcome, RefreshOutcome::FetchFailed);
    assert!(engine.load_error());

    let good = legacy_snapshot(&["P001,Доступно,10,5000"]);
    engine.apply_parse(engine.issue_token(), good, true);

    let outcome = engine.record_fetch_failure(engine.issue_token());
    assert_eq!(outcome, RefreshOutcome::FetchFailed);
    assert!(!engine.load_error());
    assert!(engine.registry().contains("P001"));
}

#[test]
fn watermark_survives_restart() {
    let dir = tempdir().unwrap();
    let expected = millis(2030, 1, 15, 12);

    {
        let engine = test_engine(&dir, FeedShape::HeaderGlobal);
        let snapshot = global_snapshot("1/15/2030 12:00:00", &["P001,Доступно,10,5000"]);
        let outcome = engine.apply_parse(engine.issue_token(), snapshot, true);
        assert_eq!(
            outcome,
            RefreshOutcome::Applied {
                units: 1,
                watermark: expected
            }
        );
    }

    let restarted = test_engine(&dir, FeedShape::HeaderGlobal);
    assert_eq!(restarted.watermark(), expected);

    // the restored watermark still gates non-initial refreshes
    let older = global_snapshot("1/15/2030 11:00:00", &["P001,Продано,10,5000"]);
    let outcome = restarted.apply_parse(restarted.issue_token(), older, false);
    assert_eq!(outcome, RefreshOutcome::NotFresh);
}

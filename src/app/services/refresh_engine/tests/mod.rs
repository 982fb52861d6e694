//! Test fixtures for the refresh engine
//!
//! Engine tests drive [`RefreshEngine::apply_parse`] directly with parsed
//! snapshots, so no network is involved; the watermark store lives in a
//! temporary directory.

use tempfile::TempDir;

use crate::app::services::feed_parser::{FeedParser, ParseResult};
use crate::config::{Config, FeedShape};

use super::RefreshEngine;

// Test modules
mod engine_tests;
mod freshness_tests;

/// Engine backed by a watermark store inside the given temp dir
pub fn test_engine(dir: &TempDir, shape: FeedShape) -> RefreshEngine {
    let config = Config {
        feed_url: "https://example.com/pub?output=csv".to_string(),
        feed_shape: shape,
        watermark_path: Some(dir.path().join("watermark")),
        ..Config::default()
    };
    RefreshEngine::new(&config).expect("engine builds from test config")
}

/// Parse a header-global feed with the given header timestamp and unit rows
pub fn global_snapshot(timestamp: &str, rows: &[&str]) -> ParseResult {
    let mut text = format!("\"{}\",Идентификатор,Статус,Площадь,Цена\n", timestamp);
    for row in rows {
        text.push_str(&format!(",{}\n", row));
    }
    FeedParser::new(FeedShape::HeaderGlobal).parse(&text)
}

/// Parse a flat feed without an update column (legacy always-fresh shape)
pub fn legacy_snapshot(rows: &[&str]) -> ParseResult {
    let mut text = String::from("Идентификатор,Статус,Площадь,Цена\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    FeedParser::new(FeedShape::PerRow).parse(&text)
}

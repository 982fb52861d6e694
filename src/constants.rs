//! Application constants for the planfeed engine
//!
//! This module contains keyword tables, fallback column positions, display
//! labels and default values used throughout the feed ingestion pipeline.

// =============================================================================
// Feed Polling Defaults
// =============================================================================

/// Default interval between feed refresh cycles, in milliseconds.
///
/// The payload is a few kilobytes, so a short interval favors near-real-time
/// status visibility on the floor plan over feed-provider load.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 5000;

/// Default per-request timeout for feed fetches, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Query parameter appended to the feed URL to defeat intermediate caches
pub const CACHE_BUSTER_PARAM: &str = "v";

/// User agent presented to the feed host
pub const FEED_USER_AGENT: &str = concat!("planfeed/", env!("CARGO_PKG_VERSION"));

/// File name of the persisted freshness watermark
pub const WATERMARK_FILE_NAME: &str = "watermark";

/// Directory under the platform config dir holding planfeed state
pub const STATE_DIR_NAME: &str = "planfeed";

// =============================================================================
// Unit Identifier Families
// =============================================================================

/// Canonical digit width for parking identifiers (`P001`)
pub const PARKING_ID_DIGITS: usize = 3;

/// Canonical digit width for storage identifiers (`K0001`)
pub const STORAGE_ID_DIGITS: usize = 4;

// =============================================================================
// Status Normalization
// =============================================================================

/// Keyword fragments recognized in free-text status cells.
///
/// Matching is performed on lowercased text with all whitespace removed, so
/// fragments never contain spaces. The feed is maintained in Russian with
/// occasional English edits; both spellings are accepted.
pub mod status_keywords {
    /// Fragments marking a unit as available
    pub const AVAILABLE: &[&str] = &["доступ", "свобод", "available", "free"];

    /// Fragments marking a unit as reserved
    pub const RESERVED: &[&str] = &["брон", "резерв", "reserv"];

    /// Fragments marking a unit as sold
    pub const SOLD: &[&str] = &["прод", "sold"];
}

/// Canonical display labels for the three unit statuses
pub mod status_labels {
    pub const AVAILABLE: &str = "Доступно";
    pub const RESERVED: &str = "Бронь";
    pub const SOLD: &str = "Продано";
}

// =============================================================================
// Header Resolution
// =============================================================================

/// Keyword fragments used to resolve free-text header cells to semantic
/// columns.
///
/// The sheet is maintained by a non-engineer and headers drift (renames,
/// added whitespace, mixed language), so columns are located by substring
/// match rather than exact names. Fragments are matched against lowercased,
/// whitespace-stripped header text.
///
/// Resolution claims one header cell per field, in the order the fields are
/// listed in [`crate::app::services::feed_parser::ColumnMap`]: the specific
/// area fragments run before the generic `кладов`, which would otherwise
/// capture the storage-area column instead of the storage-number column.
pub mod header_keywords {
    pub const ID: &[&str] = &["идентифик", "id"];
    pub const STATUS: &[&str] = &["статус", "status"];
    pub const PAIR: &[&str] = &["парн", "pair"];
    pub const STORAGE: &[&str] = &["кладов", "storage"];
    pub const SPOT_AREA: &[&str] = &["площад", "area"];
    pub const STORAGE_AREA: &[&str] = &["площадькладов", "storagearea"];
    pub const TOTAL_AREA: &[&str] = &["общ", "total", "итог"];
    pub const PRICE: &[&str] = &["цен", "price"];
    pub const UPDATED: &[&str] = &["обновл", "updated"];
}

/// Positional fallbacks used when no header cell matches a field's keywords.
///
/// These reflect the column order of the published sheet; the per-row
/// timestamp column only exists in the flat feed shape.
pub mod fallback_columns {
    pub const ID: usize = 0;
    pub const STATUS: usize = 1;
    pub const PAIR: usize = 2;
    pub const STORAGE: usize = 3;
    pub const SPOT_AREA: usize = 4;
    pub const STORAGE_AREA: usize = 5;
    pub const TOTAL_AREA: usize = 6;
    pub const PRICE: usize = 7;
    pub const UPDATED: usize = 8;
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Placeholder rendered for values that failed normalization
pub const MISSING_VALUE_DISPLAY: &str = "—";

/// Thousands separator used when formatting prices (ru-RU convention)
pub const PRICE_GROUP_SEPARATOR: char = '\u{a0}';

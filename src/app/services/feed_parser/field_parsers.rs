//! Field normalizers for hand-edited feed cells
//!
//! Every function here is total: it never fails, returning `None` (or a
//! fallback) for input it cannot interpret. Missing values propagate through
//! downstream arithmetic via [`sum_available`], which skips them instead of
//! poisoning the aggregate.

use crate::app::models::UnitStatus;
use crate::constants::{PARKING_ID_DIGITS, STORAGE_ID_DIGITS, status_keywords};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

/// Accepted identifier spellings: an optional family letter (Latin or
/// Cyrillic, either case), an optional separator, and a digit run.
static UNIT_ID_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([pPрРkKкК])?[-_.]?(\d+)$").expect("unit id pattern is valid"));

/// Lowercase text and remove all whitespace.
///
/// Keyword matching for statuses and headers runs on this form, which is what
/// lets the matching survive stray spaces and case drift in the sheet.
pub fn normalize_text(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Parse a hand-entered number ("1 234,5 ₽", "12.5", "5,000.00") as `f64`.
///
/// Everything but digits, comma, dot and minus is stripped. A comma without a
/// dot is a decimal separator; when both appear, commas are thousands
/// grouping and are dropped. Unparsable input yields `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut normalized: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let has_comma = normalized.contains(',');
    let has_dot = normalized.contains('.');

    if has_comma && !has_dot {
        normalized = normalized.replacen(',', ".", 1);
    }
    if normalized.contains(',') {
        normalized.retain(|c| c != ',');
    }

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalize a free-text status cell.
///
/// Returns the resolved status and its display label: the canonical label
/// when a keyword matched, the raw trimmed text when it did not, and the
/// default status label when the cell was blank.
pub fn parse_status(raw: &str) -> (UnitStatus, String) {
    let normalized = normalize_text(raw);

    let matched = if contains_any(&normalized, status_keywords::AVAILABLE) {
        Some(UnitStatus::Available)
    } else if contains_any(&normalized, status_keywords::RESERVED) {
        Some(UnitStatus::Reserved)
    } else if contains_any(&normalized, status_keywords::SOLD) {
        Some(UnitStatus::Sold)
    } else {
        None
    };

    match matched {
        Some(status) => (status, status.label().to_string()),
        None => {
            let trimmed = raw.trim();
            let label = if trimmed.is_empty() {
                UnitStatus::Available.label().to_string()
            } else {
                trimmed.to_string()
            };
            (UnitStatus::Available, label)
        }
    }
}

fn contains_any(normalized: &str, fragments: &[&str]) -> bool {
    fragments.iter().any(|f| normalized.contains(f))
}

/// Normalize a unit identifier to its canonical padded form.
///
/// Parking identifiers become `P` plus three digits, storage identifiers `K`
/// plus four. Latin and Cyrillic family letters are accepted in either case,
/// and a bare digit run defaults to the parking family. Shapes that match
/// neither family yield `None`, which rejects the row.
pub fn normalize_unit_id(raw: &str) -> Option<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let captures = UNIT_ID_SHAPE.captures(&compact)?;

    let family = match captures.get(1).map(|m| m.as_str()) {
        Some("k") | Some("K") | Some("к") | Some("К") => 'K',
        _ => 'P',
    };

    // parse drops leading zeros so re-padding is idempotent
    let number: u64 = captures[2].parse().ok()?;
    let width = match family {
        'K' => STORAGE_ID_DIGITS,
        _ => PARKING_ID_DIGITS,
    };

    Some(format!("{family}{number:0width$}"))
}

/// Parse a feed timestamp to epoch milliseconds.
///
/// The sheet has used `month/day/year` (spreadsheet locale export) and
/// `day.month.year` (hand-typed) date forms, optionally followed by
/// `hour:minute[:second]`; the time defaults to midnight. A slash date whose
/// first component exceeds 12 is reinterpreted day-first. Two-digit years are
/// 2000-based. Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let date_part = parts.next()?;
    let time_part = parts.next().map(str::trim).unwrap_or("");

    let (separator, day_first) = if date_part.contains('/') {
        ('/', false)
    } else if date_part.contains('.') {
        ('.', true)
    } else {
        return None;
    };

    let fields: Vec<u32> = date_part
        .split(separator)
        .map(|f| f.parse::<u32>().ok())
        .collect::<Option<_>>()?;
    if fields.len() != 3 {
        return None;
    }

    let (mut month, mut day) = if day_first {
        (fields[1], fields[0])
    } else {
        (fields[0], fields[1])
    };
    if !day_first && month > 12 {
        std::mem::swap(&mut month, &mut day);
    }

    let mut year = fields[2] as i32;
    if year < 100 {
        year += 2000;
    }

    let (hour, minute, second) = parse_time(time_part)?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(date.and_time(time).and_utc().timestamp_millis())
}

fn parse_time(time_part: &str) -> Option<(u32, u32, u32)> {
    if time_part.is_empty() {
        return Some((0, 0, 0));
    }

    let fields: Vec<&str> = time_part.split(':').collect();
    if fields.len() < 2 || fields.len() > 3 {
        return None;
    }

    let hour = fields[0].parse().ok()?;
    let minute = fields[1].parse().ok()?;
    let second = match fields.get(2) {
        Some(s) => s.parse().ok()?,
        None => 0,
    };

    Some((hour, minute, second))
}

/// Sum a sequence of possibly-missing values.
///
/// Missing contributions are skipped; the result is `None` only when every
/// contribution is missing.
pub fn sum_available(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let mut total = None;
    for value in values.into_iter().flatten() {
        total = Some(total.unwrap_or(0.0) + value);
    }
    total
}

//! Field normalizer — coerces raw field values into a canonical JSON shape.
//!
//! Strings that look like dates are rewritten as millisecond-precision
//! ISO-8601 timestamps; arrays and objects are normalized element-wise and
//! key-wise with order preserved; every other scalar passes through
//! unchanged.
//!
//! Date detection is an ordered list of explicit patterns plus a narrow
//! generic fallback (RFC 3339, then RFC 2822). A plain-text field that
//! happens to match one of the patterns WILL be converted; that is the
//! documented contract of the wire format, not something to fix silently.
//! Naive timestamps are interpreted as UTC.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Date patterns, tried in order
// ---------------------------------------------------------------------------

static DATE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static pattern"));

static ISO_8601: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?Z?$").expect("static pattern")
});

static SLASH_MDY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("static pattern"));

static SLASH_YMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").expect("static pattern"));

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Normalize a single field value, recursing into arrays and objects.
pub fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::String(s) => match parse_date_string(s) {
            Some(dt) => Value::String(to_iso_string(dt)),
            None => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(normalize_value).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), normalize_value(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Normalize every value of a fields map, key order preserved.
pub fn normalize_fields(
    fields: &serde_json::Map<String, Value>,
) -> serde_json::Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), normalize_value(value)))
        .collect()
}

/// Parse a string against the recognized date shapes.
///
/// Returns `None` for anything that is not a date, including strings that
/// match a pattern but name an impossible date (`2024-13-99`); those pass
/// through normalization unchanged.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    if DATE_ONLY.is_match(s) {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc());
    }
    if ISO_8601.is_match(s) {
        let trimmed = s.strip_suffix('Z').unwrap_or(s);
        return NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc());
    }
    if SLASH_MDY.is_match(s) {
        return NaiveDate::parse_from_str(s, "%m/%d/%Y")
            .ok()?
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc());
    }
    if SLASH_YMD.is_match(s) {
        return NaiveDate::parse_from_str(s, "%Y/%m/%d")
            .ok()?
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc());
    }
    // Generic fallback, deliberately narrower than a duck-typed date parse:
    // offset-carrying RFC 3339 first, then RFC 2822.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    None
}

/// Format a timestamp in the wire shape: `2024-01-15T10:00:00.000Z`.
///
/// Rewritten dates re-match the ISO pattern and parse back to the same
/// instant, which is what makes normalization idempotent.
pub fn to_iso_string(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

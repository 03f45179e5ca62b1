//! Safe coercion of raw JSON values. Nothing here fails: unusable input
//! falls back to the field's documented default.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;

/// Leading number with optional currency code/symbol and thousands separators.
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?:[A-Za-z]{3}\s*)?[$€£¥₹]?\s*",
        r"(?P<num>[-+]?(?:\d[\d,]*(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)"
    ))
    .expect("amount regex is valid")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATETIME_TZ_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%b %d, %Y"];

/// Follow a dotted path through nested objects.
pub fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(raw, |value, key| value.as_object()?.get(key))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// First candidate that is neither null nor an empty string.
pub fn first_present<'a>(raw: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|path| lookup(raw, path))
        .find(|v| is_present(v))
}

/// Scalar rendered as trimmed text; objects, arrays and booleans are not text.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First candidate that yields usable text.
pub fn text(raw: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|path| lookup(raw, path))
        .find_map(as_text)
}

/// First candidate that is a non-empty JSON array.
pub fn array<'a>(raw: &'a Value, candidates: &[&str]) -> Option<&'a [Value]> {
    candidates
        .iter()
        .filter_map(|path| lookup(raw, path))
        .filter_map(|v| v.as_array())
        .find(|items| !items.is_empty())
        .map(Vec::as_slice)
}

/// Parse a number, rejecting anything non-numeric or non-finite.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => AMOUNT_RE
            .captures(s)
            .and_then(|caps| caps["num"].replace(',', "").parse::<f64>().ok()),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Parse a number without ever producing NaN or infinity. Unusable input is 0.
pub fn safe_number(value: &Value) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

/// Resolve a money field: safe-parsed and clamped to be non-negative.
pub fn amount(raw: &Value, candidates: &[&str]) -> f64 {
    let Some(value) = first_present(raw, candidates) else {
        return 0.0;
    };
    match parse_number(value) {
        Some(n) if n > 0.0 => n,
        Some(_) => 0.0,
        None => {
            tracing::debug!(field = candidates[0], %value, "unparseable amount, using 0");
            0.0
        }
    }
}

/// Years that serialize as four-digit RFC 3339 and so read back unchanged.
const SUPPORTED_YEARS: RangeInclusive<i32> = 0..=9999;

/// Parse a date permissively. Naive values are read as UTC and numbers as
/// epoch milliseconds. Instants outside years 0000-9999 are unknown.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    let parsed = match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            let millis = n.as_f64()?;
            if !millis.is_finite() {
                return None;
            }
            DateTime::from_timestamp_millis(millis as i64)
        }
        _ => None,
    };
    parsed.filter(|d| SUPPORTED_YEARS.contains(&d.year()))
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_TZ_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(roam_core::start_of_day)
}

/// Resolve a date field; an unparseable winner means "unknown".
pub fn date(raw: &Value, candidates: &[&str]) -> Option<DateTime<Utc>> {
    let value = first_present(raw, candidates)?;
    let parsed = parse_date(value);
    if parsed.is_none() {
        tracing::debug!(field = candidates[0], %value, "unparseable date, treating as unknown");
    }
    parsed
}

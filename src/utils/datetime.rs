//! Date and time utility functions
//!
//! This module provides the parsing and rendering used by the enhancement
//! passes: timestamp strings produced by the server are parsed through a
//! fallback chain of the formats seen in the wild, then rendered either as
//! a fixed-pattern absolute datetime or as a humanized offset from a
//! reference instant (e.g. "in 2 hours", "3 days ago").

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_humanize::HumanTime;

use crate::constants::{DISPLAY_DATETIME_FORMAT, INVALID_DATE_MARKER};

/// Naive datetime formats accepted by [`parse_flexible`], tried in order.
/// Naive values are interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a datetime string through the supported format fallback chain.
///
/// # Arguments
/// * `input` - Raw timestamp text, leading/trailing whitespace allowed
///
/// # Returns
/// * `Option<DateTime<Utc>>` - The parsed instant, or `None` when no format
///   matched
///
/// Accepted formats, in order: RFC 3339 ("2025-01-15T14:30:00Z", offsets
/// allowed), ISO 8601 without timezone ("2025-01-15T14:30:00", seconds
/// optional), the space-separated equivalents, and bare dates
/// ("2025-01-15", taken as midnight).
pub fn parse_flexible(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}

/// Format an instant with the fixed display pattern
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format(DISPLAY_DATETIME_FORMAT).to_string()
}

/// Rewrite a raw timestamp string into the fixed `YYYY-MM-DD HH:mm` display
/// form, falling back to the invalid-date marker when it cannot be parsed.
pub fn format_absolute(raw: &str) -> String {
    format_absolute_with(raw, DISPLAY_DATETIME_FORMAT)
}

/// Same as [`format_absolute`] but with a caller-supplied strftime pattern.
pub fn format_absolute_with(raw: &str, format: &str) -> String {
    match parse_flexible(raw) {
        Some(dt) => dt.format(format).to_string(),
        None => INVALID_DATE_MARKER.to_string(),
    }
}

/// Rewrite a raw timestamp string into a humanized offset from `now`
/// ("in 2 hours", "3 days ago").
///
/// The reference instant is injected by the caller so that every element
/// rewritten within one pass agrees on the same "now".
pub fn humanize_relative(raw: &str, now: DateTime<Utc>) -> String {
    match parse_flexible(raw) {
        Some(dt) => HumanTime::from(dt.signed_duration_since(now)).to_string(),
        None => INVALID_DATE_MARKER.to_string(),
    }
}

//! Date and time conversions at the storage boundary.
//!
//! Timestamps are stored as UTC text in SQLite's native
//! `YYYY-MM-DD HH:MM:SS` form, the same shape `CURRENT_TIMESTAMP`
//! produces, so values written by the store and by column defaults sort
//! and compare together. Calendar days are stored as `YYYY-MM-DD`.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::error::StoreError;

/// Storage format for timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage format for calendar days.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar day as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format an instant as a storage timestamp (second precision, UTC).
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a storage timestamp.
///
/// Also accepts RFC 3339, which external writers sometimes use.
///
/// # Errors
///
/// Returns `StoreError::Parse` if the text matches neither format.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Ok(naive.and_utc());
    }

    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Parse(format!("invalid timestamp '{s}': {e}")))
}

/// Parse a stored calendar day.
///
/// # Errors
///
/// Returns `StoreError::Parse` if the text is not `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| StoreError::Parse(format!("invalid date '{s}': {e}")))
}

/// Parse a user-supplied day relative to `today`.
///
/// Supports:
/// - `today`, `yesterday`
/// - `N days ago`, `N weeks ago`
/// - `2024-12-15` (ISO format)
///
/// Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" => return Some(today),
        "yesterday" => return today.checked_sub_signed(Duration::days(1)),
        _ => {},
    }

    if let Some(date) = parse_days_ago(&input, today) {
        return Some(date);
    }

    NaiveDate::parse_from_str(&input, DATE_FORMAT).ok()
}

/// Parse "N days/weeks ago".
fn parse_days_ago(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 3 || parts[2] != "ago" {
        return None;
    }

    let amount: i64 = parts[0].parse().ok()?;
    let days = match parts[1].trim_end_matches('s') {
        "day" => amount,
        "week" => amount.checked_mul(7)?,
        _ => return None,
    };

    today.checked_sub_signed(Duration::try_days(days)?)
}

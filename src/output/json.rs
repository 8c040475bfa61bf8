//! JSON output formatting for pomoguard.

use serde::Serialize;
use serde_json::json;

use crate::error::StoreError;
use crate::features::activity::{DailyStats, SiteLimit, StatsTotals};

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `StoreError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format a run of daily stats as JSON, with totals
///
/// # Errors
///
/// Returns `StoreError::Parse` if JSON serialization fails.
pub fn format_days_json(days: &[DailyStats]) -> Result<String, StoreError> {
    let output = json!({
        "count": days.len(),
        "totals": StatsTotals::from_days(days),
        "days": days
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format site limits as JSON
///
/// # Errors
///
/// Returns `StoreError::Parse` if JSON serialization fails.
pub fn format_limits_json(limits: &[SiteLimit]) -> Result<String, StoreError> {
    let output = json!({
        "count": limits.len(),
        "items": limits
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_days_json_empty() {
        let json = format_days_json(&[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 0);
        assert_eq!(value["totals"]["work_minutes"], 0);
        assert!(value["days"].as_array().unwrap().is_empty());
    }
}

//! Per-site daily allowances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::visit::SiteVisitStats;

/// One `site_limits` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteLimit {
    pub id: i64,
    pub site_url: String,
    pub daily_limit_minutes: i64,
    /// Set on first insert, kept across updates
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteLimit {
    /// Minutes left today given the day's visit totals.
    #[must_use]
    pub fn remaining_minutes(&self, usage: &SiteVisitStats) -> i64 {
        (self.daily_limit_minutes - usage.total_minutes()).max(0)
    }

    /// Whether the day's visits have used up the allowance.
    #[must_use]
    pub fn is_exceeded(&self, usage: &SiteVisitStats) -> bool {
        usage.total_minutes() >= self.daily_limit_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn limit(minutes: i64) -> SiteLimit {
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap();
        SiteLimit {
            id: 1,
            site_url: "example.com".to_string(),
            daily_limit_minutes: minutes,
            created_at: at,
            updated_at: at,
        }
    }

    fn usage(seconds: Option<i64>) -> SiteVisitStats {
        SiteVisitStats {
            site_url: "example.com".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            visit_count: 3,
            total_duration_seconds: seconds,
            blocked_count: 0,
        }
    }

    #[test]
    fn test_remaining_minutes() {
        assert_eq!(limit(30).remaining_minutes(&usage(None)), 30);
        assert_eq!(limit(30).remaining_minutes(&usage(Some(600))), 20);
        assert_eq!(limit(30).remaining_minutes(&usage(Some(3600))), 0);
    }

    #[test]
    fn test_is_exceeded() {
        assert!(!limit(30).is_exceeded(&usage(Some(29 * 60 + 59))));
        assert!(limit(30).is_exceeded(&usage(Some(30 * 60))));
    }
}

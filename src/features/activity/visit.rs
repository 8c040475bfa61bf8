//! Website visits and their per-day aggregates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A tracked stretch of time on one website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteVisit {
    pub id: i64,
    pub site_url: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Whole seconds between start and end; `None` until the visit ends
    pub duration_seconds: Option<i64>,
    /// Visit was disallowed by a site-limit policy
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
}

impl SiteVisit {
    /// Whether the visit is still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Visit totals for one site on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteVisitStats {
    pub site_url: String,
    pub date: NaiveDate,
    pub visit_count: i64,
    /// Sum over ended visits; `None` when no visit has ended
    pub total_duration_seconds: Option<i64>,
    pub blocked_count: i64,
}

impl SiteVisitStats {
    /// Whole minutes spent on the site, counting only ended visits.
    #[must_use]
    pub fn total_minutes(&self) -> i64 {
        self.total_duration_seconds.unwrap_or(0) / 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_minutes() {
        let mut stats = SiteVisitStats {
            site_url: "example.com".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            visit_count: 0,
            total_duration_seconds: None,
            blocked_count: 0,
        };
        assert_eq!(stats.total_minutes(), 0);

        stats.visit_count = 2;
        stats.total_duration_seconds = Some(150);
        assert_eq!(stats.total_minutes(), 2);
    }
}

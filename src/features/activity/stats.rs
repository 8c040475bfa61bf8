//! Precomputed per-day summaries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One `daily_stats` row.
///
/// Rows are written by an external aggregation job; this crate only reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub id: i64,
    pub date: NaiveDate,
    pub total_work_minutes: i64,
    pub total_break_minutes: i64,
    pub completed_cycles: i64,
    pub blocked_attempts: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyStats {
    /// Work plus break minutes.
    #[must_use]
    pub const fn total_minutes(&self) -> i64 {
        self.total_work_minutes + self.total_break_minutes
    }
}

/// Sum a run of daily rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTotals {
    pub days: usize,
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub completed_cycles: i64,
    pub blocked_attempts: i64,
}

impl StatsTotals {
    /// Fold daily rows into totals.
    #[must_use]
    pub fn from_days(days: &[DailyStats]) -> Self {
        days.iter().fold(
            Self {
                days: days.len(),
                ..Self::default()
            },
            |acc, day| Self {
                work_minutes: acc.work_minutes + day.total_work_minutes,
                break_minutes: acc.break_minutes + day.total_break_minutes,
                completed_cycles: acc.completed_cycles + day.completed_cycles,
                blocked_attempts: acc.blocked_attempts + day.blocked_attempts,
                ..acc
            },
        )
    }
}

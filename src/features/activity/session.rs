//! Timer sessions and completed cycles.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Kind of timer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Focused work
    Work,
    /// Rest between work sessions
    Break,
}

impl SessionKind {
    /// Value stored in `timer_sessions.kind`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Break => "Break",
        }
    }

    /// Conventional pomodoro length for this kind.
    #[must_use]
    pub const fn default_duration(&self) -> Duration {
        match self {
            Self::Work => Duration::minutes(25),
            Self::Break => Duration::minutes(5),
        }
    }
}

impl FromStr for SessionKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" | "w" => Ok(Self::Work),
            "break" | "b" => Ok(Self::Break),
            other => Err(StoreError::Parse(format!(
                "invalid session kind '{other}' (expected 'work' or 'break')"
            ))),
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A persisted timer session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSession {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    /// Set once, when the session is completed
    pub end_time: Option<DateTime<Utc>>,
    /// Planned length in minutes
    pub duration_minutes: i64,
    pub kind: SessionKind,
    /// Opaque reference to an externally defined preset
    pub preset_id: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TimerSession {
    /// Whether the session is still running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Wall time between start and completion.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.end_time
            .map(|end| end.signed_duration_since(self.start_time))
    }
}

/// A work session paired with the break that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedCycle {
    pub id: i64,
    pub work_session_id: i64,
    pub break_session_id: Option<i64>,
    pub completed_at: DateTime<Utc>,
}

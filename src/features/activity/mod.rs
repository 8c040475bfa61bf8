//! Timer, website and limit tracking.
//!
//! Persists the data a pomodoro timer with website limits produces:
//! - Work and break timer sessions, paired into completed cycles
//! - Website visits, including blocked attempts
//! - Per-site daily limits
//! - Read access to precomputed daily statistics

pub mod limit;
pub mod session;
pub mod stats;
pub mod store;
pub mod visit;

pub use limit::SiteLimit;
pub use session::{CompletedCycle, SessionKind, TimerSession};
pub use stats::{DailyStats, StatsTotals};
pub use store::ActivityStore;
pub use visit::{SiteVisit, SiteVisitStats};

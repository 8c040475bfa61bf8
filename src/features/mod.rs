//! Feature implementations for pomoguard.
//!
//! - Activity tracking: timer sessions, cycles, site visits, limits, stats

pub mod activity;

//! Core abstractions for pomoguard.
//!
//! This module provides the time source and the date conversions used at
//! the storage boundary.

mod clock;
pub mod datetime;

pub use clock::{Clock, ManualClock, SystemClock};
#[cfg(test)]
pub use clock::MockClock;
pub use datetime::{format_date, format_timestamp, parse_day};

//! Storage layer for pomoguard.
//!
//! This module provides SQLite-based persistence for:
//! - Timer sessions and completed cycles
//! - Website visits and per-site limits
//! - Daily statistics

mod database;
mod migrations;

pub use database::Database;
pub use migrations::{CURRENT_VERSION, TABLES};

//! Command-line interface for pomoguard.

pub mod args;
pub mod commands;

//! Output formatting for pomoguard.
//!
//! This module renders store results as colored text or JSON.

mod json;
mod pretty;

use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::StoreError;
use crate::features::activity::{DailyStats, SiteLimit};

pub use json::*;
pub use pretty::*;

/// Render `value` as JSON or with the given pretty formatter
///
/// # Errors
///
/// Returns `StoreError::Parse` if JSON serialization fails.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    pretty: impl FnOnce(&T) -> String,
) -> Result<String, StoreError> {
    match format {
        OutputFormat::Pretty => Ok(pretty(value)),
        OutputFormat::Json => to_json(value),
    }
}

/// Format daily stats based on output format
///
/// # Errors
///
/// Returns `StoreError::Parse` if JSON serialization fails.
pub fn format_days(
    days: &[DailyStats],
    title: &str,
    format: OutputFormat,
) -> Result<String, StoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_days_pretty(days, title)),
        OutputFormat::Json => format_days_json(days),
    }
}

/// Format site limits based on output format
///
/// # Errors
///
/// Returns `StoreError::Parse` if JSON serialization fails.
pub fn format_limits(limits: &[SiteLimit], format: OutputFormat) -> Result<String, StoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_limits_pretty(limits)),
        OutputFormat::Json => format_limits_json(limits),
    }
}

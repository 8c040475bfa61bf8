//! Command implementations for pomoguard.
//!
//! This module contains the implementation of all CLI commands.

mod limit;
mod session;
mod stats;
mod visit;

pub use limit::limit;
pub use session::{cycle, session};
pub use stats::stats;
pub use visit::visit;

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::error::StoreError;
use crate::features::activity::ActivityStore;
use crate::output::to_json;

/// Execute export command
///
/// # Errors
///
/// Returns an error if the database cannot be serialized or the file
/// cannot be written.
pub fn export(
    store: &ActivityStore,
    file: &Path,
    format: OutputFormat,
) -> Result<String, StoreError> {
    let bytes = store.export_data()?;
    std::fs::write(file, &bytes)?;

    match format {
        OutputFormat::Json => to_json(&json!({
            "file": file.display().to_string(),
            "bytes": bytes.len(),
        })),
        OutputFormat::Pretty => Ok(format!(
            "💾 Exported {} bytes to {}",
            bytes.len(),
            file.display()
        )
        .green()
        .to_string()),
    }
}

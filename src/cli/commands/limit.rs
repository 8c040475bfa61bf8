//! Site limit commands.

use serde_json::json;

use crate::cli::args::{LimitCommands, OutputFormat};
use crate::error::StoreError;
use crate::features::activity::ActivityStore;
use crate::output::{format_limit_pretty, format_limits, to_json};

/// Execute limit subcommands.
///
/// # Errors
///
/// Returns an error if the site has no limit (for `show`) or the store
/// call fails.
pub fn limit(
    store: &ActivityStore,
    cmd: LimitCommands,
    format: OutputFormat,
) -> Result<String, StoreError> {
    match cmd {
        LimitCommands::Set { url, minutes } => {
            if minutes < 0 {
                return Err(StoreError::Parse(format!(
                    "daily limit must not be negative, got {minutes}"
                )));
            }
            store.set_site_limit(&url, minutes)?;
            show(store, &url, format)
        }
        LimitCommands::Show { url } => show(store, &url, format),
        LimitCommands::List => format_limits(&store.list_site_limits()?, format),
    }
}

fn show(store: &ActivityStore, url: &str, format: OutputFormat) -> Result<String, StoreError> {
    let limit = store
        .get_site_limit(url)?
        .ok_or_else(|| StoreError::NotFound(format!("no limit set for {url}")))?;
    let usage = store.get_site_visit_stats(url, None)?;

    match format {
        OutputFormat::Json => to_json(&json!({
            "limit": limit,
            "today": usage,
            "remaining_minutes": limit.remaining_minutes(&usage),
        })),
        OutputFormat::Pretty => Ok(format_limit_pretty(&limit, Some(&usage))),
    }
}

//! Statistics commands.

use chrono::NaiveDate;

use crate::cli::args::{OutputFormat, StatsCommands};
use crate::core::{format_date, parse_day};
use crate::error::StoreError;
use crate::features::activity::ActivityStore;
use crate::output::{format_day_pretty, format_days, format_site_stats_pretty, render, to_json};

/// Execute stats subcommands.
///
/// # Errors
///
/// Returns an error if a date cannot be parsed or the store call fails.
pub fn stats(
    store: &ActivityStore,
    cmd: StatsCommands,
    format: OutputFormat,
) -> Result<String, StoreError> {
    match cmd {
        StatsCommands::Daily { date } => {
            let date = resolve_date(date.as_deref(), store.today())?;
            match store.get_daily_stats(date)? {
                Some(day) => render(&day, format, format_day_pretty),
                None => match format {
                    OutputFormat::Json => to_json(&serde_json::Value::Null),
                    OutputFormat::Pretty => Ok(format!(
                        "No stats recorded for {}",
                        date.map_or_else(|| "today".to_string(), format_date)
                    )),
                },
            }
        }

        StatsCommands::Weekly => format_days(&store.get_weekly_stats()?, "Weekly stats", format),

        StatsCommands::Site { url, date } => {
            let date = resolve_date(date.as_deref(), store.today())?;
            let stats = store.get_site_visit_stats(&url, date)?;
            render(&stats, format, format_site_stats_pretty)
        }
    }
}

/// Parse an optional user-supplied day relative to `today`; `None` means
/// the store's today.
fn resolve_date(input: Option<&str>, today: NaiveDate) -> Result<Option<NaiveDate>, StoreError> {
    input
        .map(|s| {
            parse_day(s, today)
                .ok_or_else(|| StoreError::Parse(format!("could not understand date '{s}'")))
        })
        .transpose()
}

//! Timer session and cycle commands.

use colored::Colorize;

use crate::cli::args::{CycleCommands, OutputFormat, SessionCommands};
use crate::error::StoreError;
use crate::features::activity::{ActivityStore, SessionKind};
use crate::output::{format_session_pretty, render, to_json};

/// Execute session subcommands.
///
/// # Errors
///
/// Returns an error if the kind is invalid, the session is unknown, or the
/// store call fails.
pub fn session(
    store: &ActivityStore,
    cmd: SessionCommands,
    format: OutputFormat,
) -> Result<String, StoreError> {
    match cmd {
        SessionCommands::Start {
            kind,
            minutes,
            preset,
        } => {
            let kind: SessionKind = kind.parse()?;
            let minutes = minutes.unwrap_or_else(|| kind.default_duration().num_minutes());
            let id = store.start_timer_session(kind, minutes, &preset)?;
            show(store, id, format)
        }

        SessionCommands::Complete { id } => {
            if store.complete_timer_session(id)? == 0 {
                return Err(StoreError::NotFound(format!(
                    "no running timer session with id {id}"
                )));
            }
            show(store, id, format)
        }

        SessionCommands::Show { id } => show(store, id, format),
    }
}

fn show(store: &ActivityStore, id: i64, format: OutputFormat) -> Result<String, StoreError> {
    let session = store
        .get_timer_session(id)?
        .ok_or_else(|| StoreError::NotFound(format!("timer session {id}")))?;
    render(&session, format, format_session_pretty)
}

/// Execute cycle subcommands.
///
/// # Errors
///
/// Returns `StoreError::SchemaViolation` if a session id is unknown.
pub fn cycle(
    store: &ActivityStore,
    cmd: CycleCommands,
    format: OutputFormat,
) -> Result<String, StoreError> {
    match cmd {
        CycleCommands::Record { work_id, break_id } => {
            let id = store.record_completed_cycle(work_id, break_id)?;
            let cycle = store
                .get_completed_cycle(id)?
                .ok_or_else(|| StoreError::NotFound(format!("completed cycle {id}")))?;

            match format {
                OutputFormat::Json => to_json(&cycle),
                OutputFormat::Pretty => {
                    let pair = cycle.break_session_id.map_or_else(
                        || format!("work #{work_id}"),
                        |b| format!("work #{work_id} + break #{b}"),
                    );
                    Ok(format!("🔁 Cycle #{id} recorded ({pair})").green().to_string())
                }
            }
        }
    }
}

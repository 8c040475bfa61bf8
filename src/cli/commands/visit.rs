//! Site visit commands.

use crate::cli::args::{OutputFormat, VisitCommands};
use crate::error::StoreError;
use crate::features::activity::ActivityStore;
use crate::output::{format_visit_pretty, render};

/// Execute visit subcommands.
///
/// # Errors
///
/// Returns an error if the visit is unknown or already closed, or the
/// store call fails.
pub fn visit(
    store: &ActivityStore,
    cmd: VisitCommands,
    format: OutputFormat,
) -> Result<String, StoreError> {
    let id = match cmd {
        VisitCommands::Start { url } => store.start_site_visit(&url)?,
        VisitCommands::Blocked { url } => store.record_blocked_attempt(&url)?,
        VisitCommands::End { id } => {
            if store.end_site_visit(id)? == 0 {
                return Err(StoreError::NotFound(format!("no open site visit with id {id}")));
            }
            id
        }
    };

    let visit = store
        .get_site_visit(id)?
        .ok_or_else(|| StoreError::NotFound(format!("site visit {id}")))?;
    render(&visit, format, format_visit_pretty)
}

//! Console reporting of a finished run.

use crate::models::{ImportSummary, RunOutcome};
use crate::services::describe;
use camino::Utf8Path;
use std::io::{self, Write};

/// Write the user-facing lines for `outcome`.
///
/// Pass results go to `out`, except fatal ones which go to `err`. Pruned
/// plugins and the final summary go to `out`; prune failures go to `err`.
pub fn write_outcome<O: Write, E: Write>(
    outcome: &RunOutcome,
    profile: &str,
    game_root: &Utf8Path,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    for result in &outcome.results {
        if result.is_fatal() {
            writeln!(err, "{}", describe(result))?;
        } else {
            writeln!(out, "{}", describe(result))?;
        }
    }

    for path in &outcome.pruned_paths {
        writeln!(out, "removing disabled plugin {}", path)?;
    }

    for failure in &outcome.prune_failures {
        writeln!(err, "Failed to remove disabled plugin {}: {}", failure.path, failure.reason)?;
    }

    match outcome.summary {
        Some(ImportSummary::AlreadyUpToDate) => writeln!(
            out,
            "The files and folders already exist in \"{}\", the import was skipped.",
            game_root
        )?,
        Some(ImportSummary::Imported) => {
            writeln!(out, "Imported {} profile successfully.", profile)?
        }
        Some(ImportSummary::CompletedWithWarnings) | None => {}
    }

    Ok(())
}

//! CLI command implementations.
//!
//! Each command exposes an `execute` function working on an open
//! [`Session`] so the interactive shell and the one-shot subcommands share
//! the same code. The `run` functions are the subcommand entry points.

pub mod about;
pub mod entry;
pub mod export;
pub mod lookup;
pub mod shell;
pub mod show;
pub mod title;
pub mod upload;

use anyhow::{Context, Result};
use classpoints_core::{Config, Error, LoadReport, Session};

use crate::prompter::Prompter;

/// Open a session and load the saved snapshot when there is one.
pub(crate) fn open_saved_session(config: Config) -> Result<Session> {
    let mut session = Session::open(config).context("Failed to open session")?;
    // Corrected totals are already logged by the loader
    session
        .load_snapshot_if_present()
        .context("Failed to load snapshot")?;
    Ok(session)
}

/// Describe a load for the user, including corrected totals.
pub(crate) fn report_load(prompter: &mut dyn Prompter, report: &LoadReport) {
    prompter.display_message(&format!("Loaded {} students", report.loaded));
    for mismatch in &report.total_mismatches {
        prompter.display_warning(&format!(
            "Total for {} was {}, recomputed as {}",
            mismatch.id, mismatch.stored, mismatch.computed
        ));
    }
}

/// Turn an upload failure into an error that tells the user what to check.
pub(crate) fn upload_failure(error: Error) -> anyhow::Error {
    match error {
        Error::Upload(e) => anyhow::anyhow!("Upload failed: {} ({})", e, e.hint()),
        other => anyhow::Error::new(other).context("Upload failed"),
    }
}

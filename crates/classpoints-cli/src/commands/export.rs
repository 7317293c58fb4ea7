//! Export the ledger to a spreadsheet, optionally uploading it.

use anyhow::{Context, Result};
use classpoints_core::{Config, Session};

use super::upload_failure;
use crate::prompter::{Prompter, StdioPrompter};

pub fn execute(session: &Session, prompter: &mut dyn Prompter, upload: bool) -> Result<()> {
    let path = session.export().context("Export failed")?;
    prompter.display_message(&format!("Exported {}", path.display()));

    if upload {
        let key = session.upload(&path).map_err(upload_failure)?;
        prompter.display_message(&format!(
            "Uploaded to {}/{}",
            session.config().upload.bucket,
            key
        ));
    }
    Ok(())
}

pub fn run(config: Config, upload: bool) -> Result<()> {
    let session = super::open_saved_session(config)?;
    execute(&session, &mut StdioPrompter, upload)
}

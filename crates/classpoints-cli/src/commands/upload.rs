//! Upload an existing spreadsheet to object storage.

use std::path::Path;

use anyhow::Result;
use classpoints_core::{Config, Session};

use super::upload_failure;
use crate::prompter::{Prompter, StdioPrompter};

pub fn execute(session: &Session, prompter: &mut dyn Prompter, file: &Path) -> Result<()> {
    let key = session.upload(file).map_err(upload_failure)?;
    prompter.display_message(&format!(
        "Uploaded {} to {}/{}",
        file.display(),
        session.config().upload.bucket,
        key
    ));
    Ok(())
}

pub fn run(config: Config, file: &Path) -> Result<()> {
    let session = Session::open(config)?;
    execute(&session, &mut StdioPrompter, file)
}

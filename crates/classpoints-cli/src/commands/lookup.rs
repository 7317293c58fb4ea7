//! Look up a student's name by id.

use anyhow::Result;
use classpoints_core::{Config, Session};

use crate::prompter::{Prompter, StdioPrompter};

pub fn execute(session: &Session, prompter: &mut dyn Prompter, id: &str) -> Result<()> {
    match session.lookup_name(id) {
        Some(name) => prompter.display_message(&format!("{} {}", id.trim(), name)),
        None => prompter.display_warning(&format!("No student with id {}", id.trim())),
    }
    Ok(())
}

pub fn run(config: Config, id: &str) -> Result<()> {
    let session = super::open_saved_session(config)?;
    execute(&session, &mut StdioPrompter, id)
}

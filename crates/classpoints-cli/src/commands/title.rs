//! Print or change the sheet title.

use anyhow::{Context, Result};
use classpoints_core::{Config, Session};

use crate::prompter::{Prompter, StdioPrompter};

pub fn execute(session: &mut Session, prompter: &mut dyn Prompter, text: Option<&str>) -> Result<()> {
    match text {
        None => prompter.display_message(&format!("Title: {}", session.title())),
        Some(text) => {
            session.set_title(text).context("Failed to set title")?;
            prompter.display_message(&format!("Title set to {}", session.title()));
        }
    }
    Ok(())
}

pub fn run(config: Config, text: Option<&str>) -> Result<()> {
    let mut session = Session::open(config).context("Failed to open session")?;
    execute(&mut session, &mut StdioPrompter, text)
}

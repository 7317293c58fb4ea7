//! Interactive shell, the default mode.

use std::path::Path;

use anyhow::{Context, Result};
use classpoints_core::{Config, Session};
use owo_colors::OwoColorize;
use tracing::debug;

use super::report_load;
use crate::prompter::{Prompter, StdioPrompter};

const HELP: &str = "\
Commands:
  entry [id]      record points for a student
  title [text]    show or set the sheet title
  export          export the ledger (and upload when enabled)
  upload <file>   upload a spreadsheet
  save            save the ledger to the snapshot file
  load            replace the ledger with the snapshot file
  show            show the ledger
  lookup <id>     look up a student's name
  about           version and settings
  help            this list
  quit            leave the shell";

/// Outcome of one shell line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(config: Config) -> Result<()> {
    let mut session = Session::open(config).context("Failed to open session")?;
    let mut prompter = StdioPrompter;
    prompter.display_message(&format!(
        "{} {}; type help for commands",
        "classpoints".bold(),
        env!("CARGO_PKG_VERSION")
    ));
    run_with(&mut session, &mut prompter)
}

/// Read and dispatch commands until `quit` or end of input.
/// A failing command is reported and the loop continues.
pub fn run_with(session: &mut Session, prompter: &mut dyn Prompter) -> Result<()> {
    while let Some(line) = prompter.read_line("> ")? {
        match dispatch(session, prompter, line.trim()) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => prompter.display_warning(&format!("{:#}", e)),
        }
    }
    Ok(())
}

fn dispatch(session: &mut Session, prompter: &mut dyn Prompter, line: &str) -> Result<Flow> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);
    debug!("Shell command {:?} {:?}", command, arg);

    match command.to_ascii_lowercase().as_str() {
        "" => {}
        "entry" => super::entry::execute_interactive(session, prompter, arg)?,
        "title" => super::title::execute(session, prompter, arg)?,
        "export" => {
            let upload = session.config().upload.enabled;
            super::export::execute(session, prompter, upload)?
        }
        "upload" => {
            let file = arg.context("Usage: upload <file>")?;
            super::upload::execute(session, prompter, Path::new(file))?
        }
        "save" => {
            let path = session.save_snapshot().context("Save failed")?;
            prompter.display_message(&format!("Saved {}", path.display()));
        }
        "load" => {
            let report = session.load_snapshot().context("Load failed")?;
            report_load(prompter, &report);
        }
        "show" => super::show::execute(session, prompter, false)?,
        "lookup" => {
            let id = arg.context("Usage: lookup <id>")?;
            super::lookup::execute(session, prompter, id)?
        }
        "about" => super::about::execute(session, prompter),
        "help" | "?" => prompter.display_message(HELP),
        "quit" | "exit" => return Ok(Flow::Quit),
        other => prompter.display_warning(&format!(
            "Unknown command {:?}; type help for commands",
            other
        )),
    }
    Ok(Flow::Continue)
}

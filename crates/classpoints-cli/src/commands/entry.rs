//! Score entry, interactive and from command-line arguments.

use anyhow::{Context, Result, bail};
use classpoints_core::{Category, Config, ScoreEntry, Session, StudentRecord};

use crate::prompter::{Prompter, prompt_delta};

/// Parse `category=N`, e.g. `homework=2` or `卫生=-1`.
pub fn parse_delta(text: &str) -> Result<(Category, i64)> {
    let (name, value) = text
        .split_once('=')
        .with_context(|| format!("Expected CATEGORY=N, got {:?}", text))?;
    let category = Category::parse(name)?;
    let delta = value
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid score change {:?} for {}", value.trim(), category))?;
    Ok((category, delta))
}

fn summary(record: &StudentRecord) -> String {
    format!(
        "Recorded {} {}: total {}",
        record.id(),
        record.name(),
        record.total()
    )
}

/// Ask for id, name and one change per category, then apply the entry.
pub fn execute_interactive(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    id: Option<&str>,
) -> Result<()> {
    let id = match id {
        Some(id) => id.trim().to_string(),
        None => prompter
            .read_line("Student id: ")?
            .unwrap_or_default()
            .trim()
            .to_string(),
    };
    if id.is_empty() {
        prompter.display_message("Entry cancelled");
        return Ok(());
    }

    let known = session.lookup_name(&id).map(str::to_string);
    let prompt = match &known {
        Some(name) => format!("Name [{}]: ", name),
        None => "Name: ".to_string(),
    };
    let typed = prompter.read_line(&prompt)?.unwrap_or_default();
    let name = match (typed.trim(), known) {
        ("", Some(known)) => known,
        (typed, _) => typed.to_string(),
    };

    let mut entry = ScoreEntry::new(id, name);
    for category in Category::all() {
        if let Some(delta) = prompt_delta(prompter, category)? {
            entry.set_delta(category, delta);
        }
    }

    let record = session.record_entry(&entry)?;
    let message = summary(record);
    prompter.display_message(&message);
    Ok(())
}

/// Apply an entry given as arguments.
pub fn execute(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    id: &str,
    name: Option<&str>,
    deltas: &[String],
) -> Result<()> {
    let name = match name.or_else(|| session.lookup_name(id)) {
        Some(name) => name.to_string(),
        None => bail!("No name on record for {}; pass --name", id.trim()),
    };

    let mut entry = ScoreEntry::new(id, name);
    for text in deltas {
        let (category, delta) = parse_delta(text)?;
        entry.set_delta(category, delta);
    }

    let record = session.record_entry(&entry)?;
    let message = summary(record);
    prompter.display_message(&message);
    Ok(())
}

pub fn run(config: Config, id: &str, name: Option<&str>, deltas: &[String]) -> Result<()> {
    let mut session = super::open_saved_session(config)?;
    let mut prompter = crate::prompter::StdioPrompter;
    execute(&mut session, &mut prompter, id, name, deltas)?;

    let path = session.save_snapshot().context("Failed to save snapshot")?;
    prompter.display_message(&format!("Saved {}", path.display()));
    Ok(())
}

//! Print the ledger as a table or as JSON.

use anyhow::{Context, Result};
use classpoints_core::{Category, Config, Ledger, Session};
use owo_colors::OwoColorize;

use crate::prompter::{Prompter, StdioPrompter};

/// Render the ledger as a plain text table, one student per line.
pub fn render_table(ledger: &Ledger) -> String {
    let mut header = format!("{:<10} {:<12}", "ID", "Name");
    for category in Category::all() {
        header.push_str(&format!(" {:>8}", short_label(category)));
    }
    header.push_str(&format!(" {:>7}", "Total"));

    let mut lines = vec![header];
    for record in ledger.iter() {
        let mut line = format!("{:<10} {:<12}", record.id(), record.name());
        for (_, score) in record.scores() {
            line.push_str(&format!(" {:>8}", score));
        }
        line.push_str(&format!(" {:>7}", record.total()));
        lines.push(line);
    }
    lines.join("\n")
}

fn short_label(category: Category) -> &'static str {
    match category {
        Category::Attendance => "Attend",
        Category::Grooming => "Groom",
        Category::MorningReading => "Reading",
        Category::Classroom => "Class",
        Category::Homework => "Homework",
        Category::Exercises => "Exercise",
        Category::MiddayRest => "Rest",
        Category::SelfStudy => "Study",
        Category::Hygiene => "Hygiene",
    }
}

pub fn execute(session: &Session, prompter: &mut dyn Prompter, json: bool) -> Result<()> {
    if json {
        let content = serde_json::to_string_pretty(&session.ledger().to_snapshot())
            .context("Failed to serialize ledger")?;
        prompter.display_message(&content);
        return Ok(());
    }

    if session.ledger().is_empty() {
        prompter.display_message("No students recorded yet");
        return Ok(());
    }
    prompter.display_message(&format!("{}", session.title().bold()));
    prompter.display_message(&render_table(session.ledger()));
    Ok(())
}

pub fn run(config: Config, json: bool) -> Result<()> {
    let session = super::open_saved_session(config)?;
    execute(&session, &mut StdioPrompter, json)
}

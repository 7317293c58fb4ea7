//! Terminal input and output used by the commands.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use classpoints_core::Category;
use owo_colors::OwoColorize;

/// Line-oriented user interaction. Commands only talk to the user through
/// this trait so the shell can be driven by a script in tests.
pub trait Prompter {
    /// Show a prompt and read one line without its line ending.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Display a message to the user
    fn display_message(&mut self, message: &str);

    /// Display a warning message
    fn display_warning(&mut self, message: &str);
}

/// Prompter backed by stdin/stdout.
pub struct StdioPrompter;

impl Prompter for StdioPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn display_message(&mut self, message: &str) {
        println!("{}", message);
    }

    fn display_warning(&mut self, message: &str) {
        eprintln!("{}", message.yellow());
    }
}

/// Ask for a score change in one category.
///
/// A blank answer or end of input skips the category. Anything that is not
/// an integer is rejected and asked again.
pub fn prompt_delta(prompter: &mut dyn Prompter, category: Category) -> Result<Option<i64>> {
    let prompt = format!("{:>16}: ", category.label());
    loop {
        let Some(line) = prompter.read_line(&prompt)? else {
            return Ok(None);
        };
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<i64>() {
            Ok(delta) => return Ok(Some(delta)),
            Err(_) => prompter.display_warning(&format!(
                "{:?} is not a whole number; leave blank to skip",
                answer
            )),
        }
    }
}

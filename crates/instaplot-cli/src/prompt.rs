//! Interactive confirmation prompts.

use crate::error::{CliError, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is a no,
/// as are Ctrl-C and end of input.
pub fn confirm(question: &str) -> Result<bool> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Prompt(format!("Failed to initialize editor: {}", e)))?;

    match editor.readline(&format!("{} [y/N] ", question)) {
        Ok(answer) => Ok(is_yes(&answer)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
        Err(e) => Err(CliError::Prompt(e.to_string())),
    }
}

/// Question asked before an import discards the board.
pub fn discard_question(count: usize) -> String {
    let noun = if count == 1 { "card" } else { "cards" };
    format!("This will replace {} existing {}. Continue?", count, noun)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

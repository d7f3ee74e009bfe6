//! Bulk sync commands: import, export, buffer.

use super::warn_if_unsaved;
use crate::cli::{BufferArgs, ExportArgs, ImportArgs};
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::prompt;
use instaplot_board::{Board, BufferSession, ImportOutcome};
use instaplot_domain::BlobStore;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Execute the import command.
///
/// Asks before discarding a non-empty board unless `--yes` is given; the
/// file is only read once the answer is yes.
pub fn execute_import<S: BlobStore>(
    args: ImportArgs,
    board: &mut Board<S>,
    formatter: &Formatter,
) -> Result<()> {
    let from_stdin = is_stdin(&args.file);
    if from_stdin && !args.yes && !board.cards().is_empty() {
        return Err(CliError::InvalidInput(
            "Importing from stdin over a non-empty board needs --yes".to_string(),
        ));
    }
    let reader: Box<dyn Read> = if from_stdin {
        Box::new(io::stdin())
    } else {
        Box::new(fs::File::open(&args.file)?)
    };

    let mut prompt_error = None;
    let outcome = board.import_reader(reader, |count| {
        if args.yes {
            return true;
        }
        match prompt::confirm(&prompt::discard_question(count)) {
            Ok(answer) => answer,
            Err(e) => {
                prompt_error = Some(e);
                false
            }
        }
    })?;
    if let Some(e) = prompt_error {
        return Err(e);
    }

    match outcome {
        ImportOutcome::Declined => {
            println!("{}", formatter.info("Import cancelled"));
        }
        ImportOutcome::Imported(report) => {
            warn_if_unsaved(board, formatter);
            println!("{}", formatter.sync_report(&report));
        }
        ImportOutcome::NothingImported(report) => {
            println!("{}", formatter.sync_report(&report));
        }
    }
    Ok(())
}

/// Execute the export command.
pub fn execute_export<S: BlobStore>(
    args: ExportArgs,
    board: &Board<S>,
    formatter: &Formatter,
) -> Result<()> {
    let text = board.buffer_text()?;

    match args.output {
        Some(path) => {
            fs::write(&path, format!("{}\n", text))?;
            if formatter.format() != OutputFormat::Quiet {
                println!(
                    "{}",
                    formatter.success(&format!("Exported {} cards to {}", board.cards().len(), path.display()))
                );
            }
        }
        None => println!("{}", text),
    }
    Ok(())
}

/// Execute the buffer command.
///
/// Each file is one buffer state. States are fed in order, `--pace-ms`
/// apart; only a state that survives the quiet interval is parsed. Invalid
/// states are skipped without error.
pub async fn execute_buffer<S: BlobStore + Send + 'static>(
    args: BufferArgs,
    board: Board<S>,
    default_quiet: Duration,
    formatter: &Formatter,
) -> Result<()> {
    let quiet = args.debounce_ms.map(Duration::from_millis).unwrap_or(default_quiet);
    let pace = Duration::from_millis(args.pace_ms);
    let board = Arc::new(Mutex::new(board));
    let mut session = BufferSession::open(Arc::clone(&board), quiet)?;

    let mut applied = Vec::new();
    for (index, path) in args.files.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(pace).await;
        }
        // Collect the report of a parse that fired during the pause.
        if !session.is_pending() {
            applied.extend(session.flush().await);
        }
        session.edit(read_input(path)?);
    }
    applied.extend(session.flush().await);

    let guard = board
        .lock()
        .map_err(|_| CliError::InvalidInput("Board lock poisoned".to_string()))?;

    match applied.last() {
        Some(report) => {
            warn_if_unsaved(&*guard, formatter);
            println!("{}", formatter.sync_report(report));
        }
        None => println!(
            "{}",
            formatter.warning("Buffer not applied: no state held a JSON array with a valid card")
        ),
    }
    Ok(())
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(fs::read_to_string(path)?)
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

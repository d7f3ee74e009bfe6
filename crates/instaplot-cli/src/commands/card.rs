//! Card commands: list, add, edit, set, delete, move, select.

use super::{resolve_id, warn_if_unsaved};
use crate::cli::{AddArgs, CardArg, EditArgs, MoveArgs, SetArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use instaplot_board::Board;
use instaplot_domain::{BlobStore, CardField, NewCard};

/// Execute the list command.
pub fn execute_list<S: BlobStore>(board: &Board<S>, formatter: &Formatter) -> Result<()> {
    let selected = board.selected().map(|c| &c.id);
    println!("{}", formatter.format_cards(board.cards(), selected)?);
    Ok(())
}

/// Execute the add command.
pub fn execute_add<S: BlobStore>(
    args: AddArgs,
    board: &mut Board<S>,
    formatter: &Formatter,
) -> Result<()> {
    let card = board.create(NewCard {
        time: args.time,
        actor: args.actor,
        place: args.place,
        claims: args.claims,
        is_lie: args.lie,
    })?;
    warn_if_unsaved(board, formatter);

    println!("{}", formatter.format_card(&card)?);
    Ok(())
}

/// Execute the edit command.
///
/// All given fields are staged on one draft and saved together; if any
/// staged text field is empty nothing is saved.
pub fn execute_edit<S: BlobStore>(
    args: EditArgs,
    board: &mut Board<S>,
    formatter: &Formatter,
) -> Result<()> {
    let id = resolve_id(board, &args.id)?;
    let mut draft = board
        .begin_edit(&id)
        .ok_or_else(|| CliError::CardNotFound(args.id.clone()))?;

    let staged = [
        (CardField::Time, args.time),
        (CardField::Actor, args.actor),
        (CardField::Place, args.place),
        (CardField::Claims, args.claims),
    ];
    for (field, value) in staged {
        if let Some(value) = value {
            draft.set(field, value);
        }
    }
    if let Some(is_lie) = args.lie {
        draft.set_lie(is_lie);
    }

    if !draft.is_dirty() {
        println!("{}", formatter.info("Nothing to change"));
        return Ok(());
    }

    let card = board.commit_edit(draft)?;
    warn_if_unsaved(board, formatter);

    println!("{}", formatter.format_card(&card)?);
    Ok(())
}

/// Execute the set command.
pub fn execute_set<S: BlobStore>(
    args: SetArgs,
    board: &mut Board<S>,
    formatter: &Formatter,
) -> Result<()> {
    let id = resolve_id(board, &args.id)?;

    match args.field.text_field() {
        Some(field) => {
            board.update_field(&id, field, args.value);
        }
        None => {
            let is_lie = parse_flag(&args.value)?;
            board.set_lie(&id, is_lie);
        }
    }
    warn_if_unsaved(board, formatter);

    if let Some(card) = board.card(&id) {
        println!("{}", formatter.format_card(card)?);
    }
    Ok(())
}

/// Execute the delete command.
pub fn execute_delete<S: BlobStore>(
    args: CardArg,
    board: &mut Board<S>,
    formatter: &Formatter,
) -> Result<()> {
    let id = resolve_id(board, &args.id)?;
    board.delete(&id);
    warn_if_unsaved(board, formatter);

    println!("{}", formatter.success(&format!("Deleted card {}", id)));
    Ok(())
}

/// Execute the move command.
pub fn execute_move<S: BlobStore>(
    args: MoveArgs,
    board: &mut Board<S>,
    formatter: &Formatter,
) -> Result<()> {
    let id = resolve_id(board, &args.id)?;
    if !args.x.is_finite() || !args.y.is_finite() {
        return Err(CliError::InvalidInput("Coordinates must be finite".to_string()));
    }

    let moved = if args.by {
        board.drag_end(&id, args.x, args.y)
    } else {
        board.set_position(&id, args.x, args.y)
    };
    if !moved {
        return Err(CliError::InvalidInput(format!(
            "Card {} cannot be moved outside the finite coordinate range",
            id
        )));
    }
    warn_if_unsaved(board, formatter);

    if let Some(card) = board.card(&id) {
        println!("{}", formatter.format_card(card)?);
    }
    Ok(())
}

/// Execute the select command.
pub fn execute_select<S: BlobStore>(
    args: CardArg,
    board: &mut Board<S>,
    formatter: &Formatter,
) -> Result<()> {
    let id = resolve_id(board, &args.id)?;
    board.select(&id);
    execute_list(board, formatter)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "lie" | "1" => Ok(true),
        "false" | "no" | "truth" | "0" => Ok(false),
        other => Err(CliError::InvalidInput(format!(
            "Expected true or false for the lie flag, got '{}'",
            other
        ))),
    }
}

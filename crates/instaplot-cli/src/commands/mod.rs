//! Command implementations.

pub mod card;
pub mod layout;
pub mod sync;

pub use self::card::{
    execute_add, execute_delete, execute_edit, execute_list, execute_move, execute_select,
    execute_set,
};
pub use self::layout::{execute_axis, execute_organize};
pub use self::sync::{execute_buffer, execute_export, execute_import};

use crate::error::{CliError, Result};
use crate::output::Formatter;
use instaplot_board::{Board, BoardConfig};
use instaplot_domain::{BlobStore, CardId};
use instaplot_store::SqliteBlobStore;
use std::fs;
use std::path::Path;

/// Open the SQLite-backed board at `db_path`, creating its directory.
pub fn open_board(db_path: &Path, config: &BoardConfig) -> Result<Board<SqliteBlobStore>> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let store = SqliteBlobStore::new(db_path)?;
    let board = Board::open(store, config);
    tracing::debug!(
        "Opened board '{}' with {} cards",
        config.storage_key,
        board.cards().len()
    );
    Ok(board)
}

/// Resolve a full id or a unique id prefix to a card id.
pub fn resolve_id<S: BlobStore>(board: &Board<S>, raw: &str) -> Result<CardId> {
    let exact = CardId::new(raw);
    if board.card(&exact).is_some() {
        return Ok(exact);
    }

    let mut matches = board
        .cards()
        .iter()
        .filter(|c| !raw.is_empty() && c.id.as_str().starts_with(raw));

    match (matches.next(), matches.next()) {
        (Some(card), None) => Ok(card.id.clone()),
        (None, _) => Err(CliError::CardNotFound(raw.to_string())),
        (Some(_), Some(_)) => Err(CliError::InvalidInput(format!(
            "'{}' matches more than one card; use more characters",
            raw
        ))),
    }
}

/// Warn when the last write to the database failed.
pub(crate) fn warn_if_unsaved<S: BlobStore>(board: &Board<S>, formatter: &Formatter) {
    if let Some(err) = board.repository().last_persist_error() {
        eprintln!(
            "{}",
            formatter.warning(&format!("Change kept in memory only, save failed: {}", err))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instaplot_store::MemoryBlobStore;

    fn board() -> Board<MemoryBlobStore> {
        let store = MemoryBlobStore::with_blob(
            "case-plot-cards",
            r#"[
                {"id": "0192aa-1", "time": "t", "actor": "a", "place": "p", "claims": "c", "x": 1, "y": 1},
                {"id": "0192bb-2", "time": "t", "actor": "a", "place": "p", "claims": "c", "x": 1, "y": 1},
                {"id": "0192", "time": "t", "actor": "a", "place": "p", "claims": "c", "x": 1, "y": 1}
            ]"#,
        );
        Board::open(store, &BoardConfig::default())
    }

    #[test]
    fn test_exact_id_wins_over_prefix() {
        assert_eq!(resolve_id(&board(), "0192").unwrap(), CardId::new("0192"));
    }

    #[test]
    fn test_unique_prefix_resolves() {
        assert_eq!(resolve_id(&board(), "0192b").unwrap(), CardId::new("0192bb-2"));
    }

    #[test]
    fn test_ambiguous_and_unknown_prefixes() {
        assert!(matches!(resolve_id(&board(), "019"), Err(CliError::InvalidInput(_))));
        assert!(matches!(resolve_id(&board(), "zzz"), Err(CliError::CardNotFound(_))));
        assert!(matches!(resolve_id(&board(), ""), Err(CliError::CardNotFound(_))));
    }
}

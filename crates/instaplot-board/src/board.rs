//! Board orchestration
//!
//! A [`Board`] owns the card repository plus the two axis modes, and is the
//! single place where layout passes are triggered: on an axis-mode change or
//! on explicit request, never on content edits.

use crate::{BoardConfig, BoardError, CardDraft};
use instaplot_domain::{
    drag_target, organize, AxisMode, BlobStore, Card, CardField, CardId, CardPatch, NewCard,
};
use instaplot_gatekeeper::{Gatekeeper, SyncBatch, SyncError, SyncReport};
use instaplot_store::CardRepository;
use std::io::Read;
use tracing::{debug, info};

/// Result of a file import
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// The user declined to discard the current cards; nothing was read
    Declined,

    /// At least one card was accepted and the board was replaced
    Imported(SyncReport),

    /// No item was usable; the board is unchanged
    NothingImported(SyncReport),
}

impl ImportOutcome {
    /// Whether the board contents changed
    pub fn replaced(&self) -> bool {
        matches!(self, ImportOutcome::Imported(_))
    }

    /// Report for the pass, if the input was read
    pub fn report(&self) -> Option<&SyncReport> {
        match self {
            ImportOutcome::Declined => None,
            ImportOutcome::Imported(report) | ImportOutcome::NothingImported(report) => {
                Some(report)
            }
        }
    }

    /// One-line, user-facing outcome
    pub fn summary(&self) -> String {
        match self.report() {
            Some(report) => report.summary(),
            None => "Import cancelled".to_string(),
        }
    }
}

/// A plot board: cards, axis modes, and the bulk-sync validator
#[derive(Debug)]
pub struct Board<S: BlobStore> {
    repo: CardRepository<S>,
    gatekeeper: Gatekeeper,
    x_axis: AxisMode,
    y_axis: AxisMode,
}

impl<S: BlobStore> Board<S> {
    /// Load the board stored under the configured key, or the seed set.
    ///
    /// Stored coordinates are kept as they are; no layout pass runs at
    /// startup.
    pub fn open(store: S, config: &BoardConfig) -> Self {
        let repo = CardRepository::load_or_seed(store, config.storage_key.clone())
            .with_region(config.sync.placement);
        Self::from_repository(repo, config)
    }

    /// Wrap an already-loaded repository
    pub fn from_repository(repo: CardRepository<S>, config: &BoardConfig) -> Self {
        Self {
            repo,
            gatekeeper: Gatekeeper::new(config.sync.clone()),
            x_axis: config.x_axis,
            y_axis: config.y_axis,
        }
    }

    /// Underlying repository
    pub fn repository(&self) -> &CardRepository<S> {
        &self.repo
    }

    /// Cards in insertion order
    pub fn cards(&self) -> &[Card] {
        self.repo.list()
    }

    /// Look up one card
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.repo.get(id)
    }

    /// Horizontal axis mode
    pub fn x_axis(&self) -> AxisMode {
        self.x_axis
    }

    /// Vertical axis mode
    pub fn y_axis(&self) -> AxisMode {
        self.y_axis
    }

    /// Change the horizontal axis; re-lays out the board if the mode changed
    pub fn set_x_axis(&mut self, mode: AxisMode) -> bool {
        self.set_axes(mode, self.y_axis)
    }

    /// Change the vertical axis; re-lays out the board if the mode changed
    pub fn set_y_axis(&mut self, mode: AxisMode) -> bool {
        self.set_axes(self.x_axis, mode)
    }

    /// Change both axes at once. Returns whether a layout pass ran.
    pub fn set_axes(&mut self, x_axis: AxisMode, y_axis: AxisMode) -> bool {
        if x_axis == self.x_axis && y_axis == self.y_axis {
            return false;
        }
        info!("Axes changed to {} x {}", x_axis, y_axis);
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self.organize();
        true
    }

    /// Recompute every card's position from the current axis modes
    pub fn organize(&mut self) {
        let laid_out = organize(self.repo.list(), self.x_axis, self.y_axis);
        debug!("Organized {} cards", laid_out.len());
        self.repo.replace_all(laid_out);
    }

    /// Create a card at a random position
    pub fn create(&mut self, fields: NewCard) -> Result<Card, BoardError> {
        Ok(self.repo.create(fields)?)
    }

    /// Apply a partial change; unknown ids are a no-op
    pub fn update(&mut self, id: &CardId, patch: &CardPatch) -> bool {
        self.repo.update(id, patch)
    }

    /// Inline edit of one text field. Not validated.
    pub fn update_field(&mut self, id: &CardId, field: CardField, value: impl Into<String>) -> bool {
        self.repo.update(id, &CardPatch::field(field, value))
    }

    /// Inline edit of the lie flag
    pub fn set_lie(&mut self, id: &CardId, is_lie: bool) -> bool {
        self.repo.update(id, &CardPatch::lie(is_lie))
    }

    /// Remove a card
    pub fn delete(&mut self, id: &CardId) -> bool {
        self.repo.delete(id)
    }

    /// Select a card
    pub fn select(&mut self, id: &CardId) -> bool {
        self.repo.select(id)
    }

    /// Selected card, if any
    pub fn selected(&self) -> Option<&Card> {
        self.repo.selected().and_then(|id| self.repo.get(id))
    }

    /// Place a card at absolute coordinates
    pub fn set_position(&mut self, id: &CardId, x: f64, y: f64) -> bool {
        self.repo.set_position(id, x, y)
    }

    /// Commit a finished drag gesture by its total offset.
    ///
    /// Refused when the card is unknown or the new position overflows.
    pub fn drag_end(&mut self, id: &CardId, dx: f64, dy: f64) -> bool {
        let Some(card) = self.repo.get(id) else {
            return false;
        };
        let (x, y) = drag_target(card, dx, dy);
        self.repo.set_position(id, x, y)
    }

    /// Start staging changes to one card
    pub fn begin_edit(&self, id: &CardId) -> Option<CardDraft> {
        self.repo.get(id).map(CardDraft::from_card)
    }

    /// Validate and apply a draft in one update.
    ///
    /// # Errors
    ///
    /// - [`BoardError::Validation`] when a staged text field is empty
    /// - [`BoardError::NotFound`] when the card was deleted meanwhile
    pub fn commit_edit(&mut self, draft: CardDraft) -> Result<Card, BoardError> {
        draft.validate()?;
        let id = draft.id().clone();
        let patch = draft.patch();

        if patch.is_empty() {
            return self.repo.get(&id).cloned().ok_or(BoardError::NotFound(id));
        }
        if !self.repo.update(&id, &patch) {
            return Err(BoardError::NotFound(id));
        }
        self.repo.get(&id).cloned().ok_or(BoardError::NotFound(id))
    }

    /// Replace the board from a JSON file's text.
    ///
    /// When the board holds cards, `confirm` is asked first with the number
    /// that would be discarded; a `false` answer returns
    /// [`ImportOutcome::Declined`] without reading `text`.
    ///
    /// # Errors
    ///
    /// [`BoardError::Sync`] when the text is not JSON or not an array. The
    /// board is unchanged in that case.
    pub fn import_file<F>(&mut self, text: &str, confirm: F) -> Result<ImportOutcome, BoardError>
    where
        F: FnOnce(usize) -> bool,
    {
        if !self.confirm_replace(confirm) {
            return Ok(ImportOutcome::Declined);
        }
        let batch = self.gatekeeper.parse_import(text)?;
        Ok(self.apply_import(batch))
    }

    /// Like [`Board::import_file`], reading the text from `reader` only after
    /// the user confirmed.
    pub fn import_reader<R, F>(&mut self, mut reader: R, confirm: F) -> Result<ImportOutcome, BoardError>
    where
        R: Read,
        F: FnOnce(usize) -> bool,
    {
        if !self.confirm_replace(confirm) {
            return Ok(ImportOutcome::Declined);
        }
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let batch = self.gatekeeper.parse_import(&text)?;
        Ok(self.apply_import(batch))
    }

    /// Replace the board from an already-parsed JSON value
    pub fn import_value<F>(
        &mut self,
        value: &serde_json::Value,
        confirm: F,
    ) -> Result<ImportOutcome, BoardError>
    where
        F: FnOnce(usize) -> bool,
    {
        if !self.confirm_replace(confirm) {
            return Ok(ImportOutcome::Declined);
        }
        let batch = self.gatekeeper.validate_value(value)?;
        Ok(self.apply_import(batch))
    }

    /// Apply freeform buffer text.
    ///
    /// Unparseable text, a non-array, or an array with no acceptable item
    /// leave the board untouched and return `None`. Otherwise the board is
    /// replaced without a layout pass and the report is returned.
    pub fn apply_buffer(&mut self, text: &str) -> Option<SyncReport> {
        let batch = match self.gatekeeper.parse_import(text) {
            Ok(batch) => batch,
            Err(SyncError::Parse(e)) => {
                debug!("Buffer is not JSON yet: {}", e);
                return None;
            }
            Err(e) => {
                debug!("Buffer ignored: {}", e);
                return None;
            }
        };

        if !batch.report.is_applicable() {
            debug!("Buffer holds no usable cards ({} items)", batch.report.total);
            return None;
        }

        debug!("Buffer applied: {}", batch.report.summary());
        self.repo.replace_all(batch.cards);
        Some(batch.report)
    }

    /// Pretty-printed JSON of the live collection
    pub fn buffer_text(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(self.repo.list())?)
    }

    fn confirm_replace<F: FnOnce(usize) -> bool>(&self, confirm: F) -> bool {
        if self.repo.is_empty() {
            return true;
        }
        let accepted = confirm(self.repo.len());
        if !accepted {
            info!("Import declined, keeping {} cards", self.repo.len());
        }
        accepted
    }

    fn apply_import(&mut self, batch: SyncBatch) -> ImportOutcome {
        let SyncBatch { cards, report } = batch;
        if !report.is_applicable() {
            info!("Import left board unchanged: {}", report.summary());
            return ImportOutcome::NothingImported(report);
        }
        info!("{}", report.summary());
        self.repo.replace_all(cards);
        ImportOutcome::Imported(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instaplot_store::MemoryBlobStore;

    fn seeded() -> Board<MemoryBlobStore> {
        Board::open(MemoryBlobStore::new(), &BoardConfig::default())
    }

    #[test]
    fn test_open_keeps_stored_positions() {
        let board = seeded();
        assert_eq!(board.cards()[0].position(), (100.0, 100.0));
        assert_eq!(board.cards()[1].position(), (300.0, 200.0));
        assert_eq!(board.repository().store().write_count(), 0);
    }

    #[test]
    fn test_same_axis_does_not_relayout() {
        let mut board = seeded();
        assert!(!board.set_x_axis(AxisMode::Place));
        assert_eq!(board.repository().store().write_count(), 0);
    }

    #[test]
    fn test_axis_change_relayouts() {
        let mut board = seeded();
        assert!(board.set_x_axis(AxisMode::Actor));
        // John Smith first-seen, Jane Doe second; time spans the full height
        assert_eq!(board.cards()[0].position(), (100.0, 100.0));
        assert_eq!(board.cards()[1].position(), (300.0, 500.0));
    }

    #[test]
    fn test_drag_end_applies_delta() {
        let mut board = seeded();
        let id = CardId::new("1");
        assert!(board.drag_end(&id, -150.0, 25.5));
        assert_eq!(board.card(&id).unwrap().position(), (-50.0, 125.5));
        assert!(!board.drag_end(&CardId::new("nope"), 1.0, 1.0));
    }

    #[test]
    fn test_commit_edit_applies_once() {
        let mut board = seeded();
        let mut draft = board.begin_edit(&CardId::new("2")).unwrap();
        draft.set(CardField::Actor, "J. Doe").set_lie(false);

        let card = board.commit_edit(draft).unwrap();
        assert_eq!(card.actor, "J. Doe");
        assert!(!card.is_lie);
        assert_eq!(card.position(), (300.0, 200.0));
        assert_eq!(board.repository().store().write_count(), 1);
    }

    #[test]
    fn test_dropped_draft_changes_nothing() {
        let mut board = seeded();
        {
            let mut draft = board.begin_edit(&CardId::new("1")).unwrap();
            draft.set(CardField::Claims, "never saved");
        }
        assert_eq!(board.cards()[0].claims, "Was in a meeting with the client");
    }

    #[test]
    fn test_commit_after_delete_is_not_found() {
        let mut board = seeded();
        let id = CardId::new("1");
        let mut draft = board.begin_edit(&id).unwrap();
        draft.set(CardField::Place, "Lobby");
        board.delete(&id);

        assert!(matches!(
            board.commit_edit(draft),
            Err(BoardError::NotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn test_invalid_draft_is_rejected() {
        let mut board = seeded();
        let mut draft = board.begin_edit(&CardId::new("1")).unwrap();
        draft.set(CardField::Actor, "");
        assert!(matches!(board.commit_edit(draft), Err(BoardError::Validation(_))));
        assert_eq!(board.cards()[0].actor, "John Smith");
    }

    #[test]
    fn test_buffer_text_round_trips_through_apply() {
        let mut board = seeded();
        let text = board.buffer_text().unwrap();
        assert!(text.contains("\"isLie\": true"));

        let before = board.cards().to_vec();
        let report = board.apply_buffer(&text).unwrap();
        assert!(report.is_complete());
        assert_eq!(board.cards(), before.as_slice());
    }

    #[test]
    fn test_apply_buffer_ignores_drafts() {
        let mut board = seeded();
        assert_eq!(board.apply_buffer("[{\"time\": "), None);
        assert_eq!(board.apply_buffer("{}"), None);
        assert_eq!(board.apply_buffer("[{\"actor\": \"x\"}]"), None);
        assert_eq!(board.apply_buffer("[]"), None);
        assert_eq!(board.repository().store().write_count(), 0);
        assert_eq!(board.cards().len(), 2);
    }

    #[test]
    fn test_selected_card() {
        let mut board = seeded();
        assert!(board.selected().is_none());
        board.select(&CardId::new("2"));
        assert_eq!(board.selected().unwrap().actor, "Jane Doe");
    }
}

//! Card repository - the authoritative record store
//!
//! The repository owns the card collection for a session. It is loaded from
//! the blob store exactly once (falling back to the seed set), and every
//! mutating call writes the full collection back under one key.
//!
//! Persistence is best-effort: a failed write is logged and remembered, but
//! the in-memory collection stays authoritative and is never rolled back.

use instaplot_domain::{
    seed_cards, BlobStore, Card, CardId, CardPatch, CardValidationError, NewCard,
    PlacementRegion,
};
use crate::StoreError;
use tracing::{debug, error, info, warn};

/// Blob key the board collection lives under
pub const DEFAULT_STORAGE_KEY: &str = "case-plot-cards";

/// Where the collection came from at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from the blob store
    Stored,
    /// No blob existed; the seed set was used
    SeededEmpty,
    /// The blob could not be read or decoded; the seed set was used
    SeededAfterFailure,
}

/// In-memory card collection with write-through persistence
#[derive(Debug)]
pub struct CardRepository<S: BlobStore> {
    store: S,
    key: String,
    cards: Vec<Card>,
    selected: Option<CardId>,
    region: PlacementRegion,
    source: LoadSource,
    last_persist_error: Option<String>,
}

impl<S: BlobStore> CardRepository<S> {
    /// Load the collection stored under `key`, or the seed set.
    ///
    /// Never fails: a missing blob, a read error, or an undecodable blob all
    /// yield the two seed cards. Nothing is written until the first mutation.
    pub fn load_or_seed(store: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let (cards, source) = match store.get(&key) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Card>>(&blob) {
                Ok(cards) => {
                    info!("Loaded {} cards from '{}'", cards.len(), key);
                    (cards, LoadSource::Stored)
                }
                Err(e) => {
                    warn!("Stored cards under '{}' are unreadable, using seed: {}", key, e);
                    (seed_cards(), LoadSource::SeededAfterFailure)
                }
            },
            Ok(None) => {
                debug!("No cards stored under '{}', using seed", key);
                (seed_cards(), LoadSource::SeededEmpty)
            }
            Err(e) => {
                warn!("Failed to read cards under '{}', using seed: {}", key, e);
                (seed_cards(), LoadSource::SeededAfterFailure)
            }
        };

        Self {
            store,
            key,
            cards,
            selected: None,
            region: PlacementRegion::default(),
            source,
            last_persist_error: None,
        }
    }

    /// Use a different region for random initial placement
    pub fn with_region(mut self, region: PlacementRegion) -> Self {
        self.region = region;
        self
    }

    /// How the collection was initialized
    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    /// Blob key this repository writes to
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying blob store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Message of the most recent failed write, cleared by a successful one
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Cards in insertion order
    pub fn list(&self) -> &[Card] {
        &self.cards
    }

    /// Look up one card
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Whether a card with this id exists
    pub fn contains(&self, id: &CardId) -> bool {
        self.get(id).is_some()
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the board is empty
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Create a card from form fields.
    ///
    /// Rejects empty text fields. The new card gets a fresh unique id and a
    /// random position inside the placement region.
    pub fn create(&mut self, fields: NewCard) -> Result<Card, CardValidationError> {
        fields.validate()?;

        let mut id = CardId::generate();
        while self.contains(&id) {
            id = CardId::generate();
        }
        let position = self.region.random_point(&mut rand::thread_rng());
        let card = fields.into_card(id, position);

        debug!("Created card {} at ({:.1}, {:.1})", card.id, card.x, card.y);
        self.cards.push(card.clone());
        self.persist();
        Ok(card)
    }

    /// Apply a partial change. Returns `false` (and writes nothing) when the
    /// id is unknown or the patch carries a NaN or infinite coordinate.
    ///
    /// Field contents are not re-validated here.
    pub fn update(&mut self, id: &CardId, patch: &CardPatch) -> bool {
        if [patch.x, patch.y].into_iter().flatten().any(|v| !v.is_finite()) {
            warn!("Update of card {} ignored, coordinate is not finite", id);
            return false;
        }
        let Some(card) = self.cards.iter_mut().find(|c| &c.id == id) else {
            debug!("Update ignored, no card {}", id);
            return false;
        };
        patch.apply(card);
        self.persist();
        true
    }

    /// Move a card, bypassing layout. Coordinates are not bounded but must
    /// be finite.
    pub fn set_position(&mut self, id: &CardId, x: f64, y: f64) -> bool {
        self.update(id, &CardPatch::position(x, y))
    }

    /// Remove a card and any selection pointing at it
    pub fn delete(&mut self, id: &CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| &c.id != id);
        if self.cards.len() == before {
            debug!("Delete ignored, no card {}", id);
            return false;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.persist();
        true
    }

    /// Swap in a whole new collection.
    ///
    /// The caller guarantees ids are unique. A selection whose card did not
    /// survive is cleared.
    pub fn replace_all(&mut self, cards: Vec<Card>) {
        debug!("Replacing {} cards with {}", self.cards.len(), cards.len());
        self.cards = cards;
        if let Some(selected) = &self.selected {
            if !self.cards.iter().any(|c| &c.id == selected) {
                self.selected = None;
            }
        }
        self.persist();
    }

    /// Mark one card as selected; unknown ids are ignored
    pub fn select(&mut self, id: &CardId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    /// Currently selected card id
    pub fn selected(&self) -> Option<&CardId> {
        self.selected.as_ref()
    }

    /// Drop the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Write the full collection under the repository key.
    fn persist(&mut self) {
        let blob = match encode(&self.cards) {
            Ok(blob) => blob,
            Err(e) => {
                error!("Failed to serialize {} cards: {}", self.cards.len(), e);
                self.last_persist_error = Some(e.to_string());
                return;
            }
        };

        match self.store.set(&self.key, &blob) {
            Ok(()) => {
                self.last_persist_error = None;
            }
            Err(e) => {
                error!("Failed to save cards under '{}': {}", self.key, e);
                self.last_persist_error = Some(e.to_string());
            }
        }
    }
}

fn encode(cards: &[Card]) -> Result<String, StoreError> {
    // JSON has no inf/NaN; serde_json would write null and the blob would not load back.
    if let Some(card) = cards.iter().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(StoreError::NonFiniteCoordinate(card.id.clone()));
    }
    Ok(serde_json::to_string(cards)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBlobStore;
    use instaplot_domain::CardField;
    use std::fmt;

    #[derive(Debug)]
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("disk on fire")
        }
    }

    impl std::error::Error for Broken {}

    /// Store whose reads and writes always fail
    struct BrokenStore;

    impl BlobStore for BrokenStore {
        type Error = Broken;

        fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
            Err(Broken)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), Self::Error> {
            Err(Broken)
        }
    }

    fn fields(actor: &str) -> NewCard {
        NewCard {
            time: "2024-02-02T12:00".to_string(),
            actor: actor.to_string(),
            place: "Harbor".to_string(),
            claims: "Heard shouting".to_string(),
            is_lie: false,
        }
    }

    fn empty_repo() -> CardRepository<MemoryBlobStore> {
        let store = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, "[]");
        CardRepository::load_or_seed(store, DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn test_missing_blob_seeds_without_writing() {
        let repo = CardRepository::load_or_seed(MemoryBlobStore::new(), DEFAULT_STORAGE_KEY);
        assert_eq!(repo.load_source(), LoadSource::SeededEmpty);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.store().write_count(), 0);
    }

    #[test]
    fn test_corrupt_blob_seeds() {
        let store = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, "{not json");
        let repo = CardRepository::load_or_seed(store, DEFAULT_STORAGE_KEY);
        assert_eq!(repo.load_source(), LoadSource::SeededAfterFailure);
        assert_eq!(repo.list()[0].id, CardId::new("1"));
    }

    #[test]
    fn test_empty_array_is_an_empty_board() {
        let repo = empty_repo();
        assert_eq!(repo.load_source(), LoadSource::Stored);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_create_rejects_empty_fields_and_places_randomly() {
        let mut repo = empty_repo();

        let mut bad = fields("Ana");
        bad.claims.clear();
        assert_eq!(
            repo.create(bad),
            Err(CardValidationError::EmptyField(CardField::Claims))
        );
        assert!(repo.is_empty());
        assert_eq!(repo.store().write_count(), 0);

        let card = repo.create(fields("Ana")).unwrap();
        assert!(PlacementRegion::default().contains(card.position()));
        assert_eq!(repo.store().write_count(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut repo = empty_repo();
        let a = repo.create(fields("A")).unwrap();
        let b = repo.create(fields("B")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut repo = empty_repo();
        for actor in ["Zed", "Amy", "Mo"] {
            repo.create(fields(actor)).unwrap();
        }
        let actors: Vec<&str> = repo.list().iter().map(|c| c.actor.as_str()).collect();
        assert_eq!(actors, vec!["Zed", "Amy", "Mo"]);
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut repo = empty_repo();
        let ghost = CardId::new("ghost");
        assert!(!repo.update(&ghost, &CardPatch::lie(true)));
        assert!(!repo.delete(&ghost));
        assert!(!repo.set_position(&ghost, 1.0, 1.0));
        assert!(!repo.select(&ghost));
        assert_eq!(repo.store().write_count(), 0);
    }

    #[test]
    fn test_update_does_not_revalidate() {
        let mut repo = empty_repo();
        let card = repo.create(fields("Ana")).unwrap();
        assert!(repo.update(&card.id, &CardPatch::field(CardField::Actor, "")));
        assert_eq!(repo.get(&card.id).unwrap().actor, "");
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut repo = empty_repo();
        let a = repo.create(fields("A")).unwrap();
        let b = repo.create(fields("B")).unwrap();

        assert!(repo.select(&a.id));
        repo.delete(&b.id);
        assert_eq!(repo.selected(), Some(&a.id));

        repo.delete(&a.id);
        assert_eq!(repo.selected(), None);
    }

    #[test]
    fn test_replace_all_drops_stale_selection() {
        let mut repo = CardRepository::load_or_seed(MemoryBlobStore::new(), DEFAULT_STORAGE_KEY);
        repo.select(&CardId::new("2"));

        let keep = repo.list()[0].clone();
        repo.replace_all(vec![keep]);
        assert_eq!(repo.selected(), None);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_failing_store_keeps_memory_authoritative() {
        let mut repo = CardRepository::load_or_seed(BrokenStore, DEFAULT_STORAGE_KEY);
        assert_eq!(repo.load_source(), LoadSource::SeededAfterFailure);

        let card = repo.create(fields("Ana")).unwrap();
        assert_eq!(repo.len(), 3);
        assert_eq!(repo.last_persist_error(), Some("disk on fire"));

        assert!(repo.set_position(&card.id, -40.0, 9000.0));
        assert_eq!(repo.get(&card.id).unwrap().position(), (-40.0, 9000.0));
    }

    #[test]
    fn test_every_mutation_writes() {
        let mut repo = empty_repo();
        let card = repo.create(fields("Ana")).unwrap();
        repo.update(&card.id, &CardPatch::lie(true));
        repo.set_position(&card.id, 5.0, 5.0);
        let snapshot = repo.list().to_vec();
        repo.replace_all(snapshot);
        repo.delete(&card.id);
        assert_eq!(repo.store().write_count(), 5);
    }

    #[test]
    fn test_non_finite_position_is_refused() {
        let mut repo = empty_repo();
        let card = repo.create(fields("Ana")).unwrap();

        assert!(!repo.set_position(&card.id, f64::INFINITY, 10.0));
        assert!(!repo.set_position(&card.id, 10.0, f64::NAN));
        assert!(!repo.update(&card.id, &CardPatch::position(f64::NEG_INFINITY, 0.0)));

        assert_eq!(repo.get(&card.id).unwrap().position(), card.position());
        assert_eq!(repo.store().write_count(), 1);
        assert!(repo.last_persist_error().is_none());
    }

    #[test]
    fn test_encode_fails_on_non_finite_coordinate() {
        let mut cards = seed_cards();
        cards[1].y = f64::NAN;
        match encode(&cards) {
            Err(StoreError::NonFiniteCoordinate(id)) => assert_eq!(id, CardId::new("2")),
            other => panic!("expected NonFiniteCoordinate, got {:?}", other),
        }
    }

    #[test]
    fn test_unencodable_collection_is_recorded_not_written() {
        let mut repo = empty_repo();
        let card = repo.create(fields("Ana")).unwrap();

        let mut cards = repo.list().to_vec();
        cards[0].x = f64::INFINITY;
        repo.replace_all(cards);

        assert_eq!(repo.store().write_count(), 1);
        assert_eq!(
            repo.last_persist_error(),
            Some(format!("Card {} has a non-finite coordinate", card.id).as_str())
        );
    }
}

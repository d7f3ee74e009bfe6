//! Integration tests for instaplot-store
//!
//! These tests verify that a board survives a save/reload cycle through the
//! SQLite blob store.

use instaplot_domain::{BlobStore, CardId, CardPatch, NewCard};
use instaplot_store::{CardRepository, LoadSource, SqliteBlobStore, DEFAULT_STORAGE_KEY};

fn fields(i: usize) -> NewCard {
    NewCard {
        time: format!("2024-05-{:02}T08:30", i + 1),
        actor: format!("Witness {}", i % 3),
        place: format!("Room {}", i % 2),
        claims: format!("Statement number {}", i),
        is_lie: i % 2 == 1,
    }
}

#[test]
fn test_round_trip_through_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    let saved = {
        let store = SqliteBlobStore::new(&path).unwrap();
        let mut repo = CardRepository::load_or_seed(store, DEFAULT_STORAGE_KEY);
        repo.replace_all(Vec::new());
        for i in 0..6 {
            repo.create(fields(i)).unwrap();
        }
        assert!(repo.last_persist_error().is_none());
        repo.list().to_vec()
    };

    let store = SqliteBlobStore::new(&path).unwrap();
    let reloaded = CardRepository::load_or_seed(store, DEFAULT_STORAGE_KEY);

    assert_eq!(reloaded.load_source(), LoadSource::Stored);
    assert_eq!(reloaded.list(), saved.as_slice());
}

#[test]
fn test_coordinates_survive_bit_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    let id = {
        let store = SqliteBlobStore::new(&path).unwrap();
        let mut repo = CardRepository::load_or_seed(store, DEFAULT_STORAGE_KEY);
        let card = repo.create(fields(0)).unwrap();
        repo.set_position(&card.id, 0.1 + 0.2, -1.0e-7);
        card.id
    };

    let store = SqliteBlobStore::new(&path).unwrap();
    let reloaded = CardRepository::load_or_seed(store, DEFAULT_STORAGE_KEY);
    let card = reloaded.get(&id).unwrap();
    assert_eq!(card.x.to_bits(), (0.1f64 + 0.2).to_bits());
    assert_eq!(card.y.to_bits(), (-1.0e-7f64).to_bits());
}

#[test]
fn test_seed_is_not_written_until_first_mutation() {
    let store = SqliteBlobStore::new(":memory:").unwrap();
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);

    let mut repo = CardRepository::load_or_seed(store, DEFAULT_STORAGE_KEY);
    assert_eq!(repo.load_source(), LoadSource::SeededEmpty);
    assert_eq!(repo.store().get(DEFAULT_STORAGE_KEY).unwrap(), None);

    repo.update(&CardId::new("1"), &CardPatch::lie(true));
    let blob = repo.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert!(blob.contains("\"isLie\":true"));
}

#[test]
fn test_separate_keys_are_separate_boards() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    {
        let mut a = CardRepository::load_or_seed(SqliteBlobStore::new(&path).unwrap(), "case-a");
        a.replace_all(Vec::new());
    }

    let a = CardRepository::load_or_seed(SqliteBlobStore::new(&path).unwrap(), "case-a");
    let b = CardRepository::load_or_seed(SqliteBlobStore::new(&path).unwrap(), "case-b");
    assert!(a.is_empty());
    assert_eq!(b.len(), 2);
}

#[test]
fn test_legacy_snake_case_blob_loads() {
    let mut store = SqliteBlobStore::new(":memory:").unwrap();
    store
        .set(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":"1712","time":"2024-01-15T09:00","actor":"A","place":"P","claims":"C","is_lie":true,"x":10,"y":20}]"#,
        )
        .unwrap();

    let repo = CardRepository::load_or_seed(store, DEFAULT_STORAGE_KEY);
    assert_eq!(repo.load_source(), LoadSource::Stored);
    let card = repo.get(&CardId::new("1712")).unwrap();
    assert!(card.is_lie);
    assert_eq!(card.position(), (10.0, 20.0));
}

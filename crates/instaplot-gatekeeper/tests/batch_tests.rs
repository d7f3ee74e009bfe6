//! Integration tests for batch validation
//!
//! These exercise whole import arrays the way a file or a freeform buffer
//! delivers them.

use instaplot_domain::{CardField, CardId};
use instaplot_gatekeeper::{Gatekeeper, RejectionReason, SyncError};

#[test]
fn test_partial_acceptance_reports_the_bad_item() {
    let gatekeeper = Gatekeeper::default_config();
    let text = r#"[
        {"id": "a", "time": "2024-01-15T09:00", "actor": "John", "place": "Office", "claims": "Meeting"},
        {"id": "b", "time": "2024-01-15T10:00", "actor": "Jane", "place": "Cafe"},
        {"id": "c", "time": "2024-01-15T11:00", "actor": "Jim", "place": "Park", "claims": "Walking"}
    ]"#;

    let batch = gatekeeper.parse_import(text).unwrap();

    let ids: Vec<&str> = batch.cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(batch.report.total, 3);
    assert_eq!(batch.report.accepted, 2);
    assert_eq!(batch.report.rejected(), 1);
    assert_eq!(batch.report.errors[0].item_number(), 2);
    assert_eq!(
        batch.report.errors[0].reason,
        RejectionReason::MissingField(CardField::Claims)
    );
    assert_eq!(batch.report.summary(), "Imported 2 cards with 1 error");
}

#[test]
fn test_all_invalid_reports_every_item() {
    let gatekeeper = Gatekeeper::default_config();
    let text = r#"[
        {"time": "2024-01-15T09:00", "actor": "John", "place": "Office"},
        {"actor": "Jane", "place": "Cafe", "claims": "Coffee"},
        42
    ]"#;

    let batch = gatekeeper.parse_import(text).unwrap();
    assert!(batch.cards.is_empty());
    assert!(!batch.report.is_applicable());
    let numbers: Vec<usize> = batch.report.errors.iter().map(|e| e.item_number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_collect_all_not_fail_fast() {
    let gatekeeper = Gatekeeper::default_config();
    let text = r#"[
        {"actor": "x"},
        {"time": "t", "actor": "a", "place": "p", "claims": "c"},
        {"actor": "y"},
        {"time": "t", "actor": "a", "place": "p", "claims": "c"}
    ]"#;

    let batch = gatekeeper.parse_import(text).unwrap();
    assert_eq!(batch.cards.len(), 2);
    assert_eq!(batch.report.errors.len(), 2);
}

#[test]
fn test_export_shape_round_trips_through_validation() {
    let gatekeeper = Gatekeeper::default_config();
    let cards = instaplot_domain::seed_cards();
    let text = serde_json::to_string_pretty(&cards).unwrap();

    let batch = gatekeeper.parse_import(&text).unwrap();
    assert_eq!(batch.cards, cards);
}

#[test]
fn test_fatal_errors() {
    let gatekeeper = Gatekeeper::default_config();
    assert_eq!(
        gatekeeper.parse_import(r#"{"cards": []}"#).unwrap_err(),
        SyncError::Format("an object")
    );
    assert!(matches!(
        gatekeeper.parse_import("not json").unwrap_err(),
        SyncError::Parse(_)
    ));
}

#[test]
fn test_empty_array_is_not_applicable() {
    let gatekeeper = Gatekeeper::default_config();
    let batch = gatekeeper.parse_import("[]").unwrap();
    assert!(!batch.report.is_applicable());
    assert!(batch.report.is_complete());
}

#[test]
fn test_ids_are_unique_in_every_batch() {
    let gatekeeper = Gatekeeper::default_config();
    let text = r#"[
        {"id": 7, "time": "t", "actor": "a", "place": "p", "claims": "c"},
        {"id": "7", "time": "t", "actor": "a", "place": "p", "claims": "c"},
        {"time": "t", "actor": "a", "place": "p", "claims": "c"}
    ]"#;
    let batch = gatekeeper.parse_import(text).unwrap();

    let mut ids: Vec<CardId> = batch.cards.iter().map(|c| c.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert_eq!(batch.cards[0].id, CardId::new("7"));
}

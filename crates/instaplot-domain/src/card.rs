//! Card module - the unit of record on an investigation board

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque, immutable identifier for a card
///
/// Fresh ids are UUIDv7 strings, but any non-empty string is a valid id:
/// the seed set uses `"1"` and `"2"`, and imported files may carry their own
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Generate a new UUIDv7-based CardId
    ///
    /// # Examples
    ///
    /// ```
    /// use instaplot_domain::CardId;
    ///
    /// let a = CardId::generate();
    /// let b = CardId::generate();
    /// assert_ne!(a, b);
    /// assert_eq!(a.as_str().len(), 36);
    /// ```
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an existing identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The four text fields every accepted card must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    /// Timestamp text (ISO-like, minute precision)
    Time,
    /// Person or entity making the statement
    Actor,
    /// Location of the statement
    Place,
    /// Narrative content
    Claims,
}

impl CardField {
    /// All text fields, in wire order
    pub const ALL: [CardField; 4] = [
        CardField::Time,
        CardField::Actor,
        CardField::Place,
        CardField::Claims,
    ];

    /// JSON / display name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            CardField::Time => "time",
            CardField::Actor => "actor",
            CardField::Place => "place",
            CardField::Claims => "claims",
        }
    }

    /// Parse a field from its name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "time" => Some(CardField::Time),
            "actor" => Some(CardField::Actor),
            "place" => Some(CardField::Place),
            "claims" | "claim" => Some(CardField::Claims),
            _ => None,
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection raised when a card is created with a missing text field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    /// A required text field is empty
    #[error("field `{0}` must not be empty")]
    EmptyField(CardField),
}

/// A statement placed on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier, fixed at creation
    pub id: CardId,

    /// Sortable timestamp text
    pub time: String,

    /// Who made the statement
    pub actor: String,

    /// Where the statement was made
    pub place: String,

    /// What was claimed or observed
    pub claims: String,

    /// User judgment that the statement is false
    #[serde(rename = "isLie", alias = "is_lie", default)]
    pub is_lie: bool,

    /// Horizontal canvas coordinate
    pub x: f64,

    /// Vertical canvas coordinate
    pub y: f64,
}

impl Card {
    /// Read one text field
    pub fn field(&self, field: CardField) -> &str {
        match field {
            CardField::Time => &self.time,
            CardField::Actor => &self.actor,
            CardField::Place => &self.place,
            CardField::Claims => &self.claims,
        }
    }

    /// Current coordinates as a pair
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Field values collected by the creation form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCard {
    /// Timestamp text
    pub time: String,
    /// Actor label
    pub actor: String,
    /// Place label
    pub place: String,
    /// Claim text
    pub claims: String,
    /// Lie flag
    pub is_lie: bool,
}

impl NewCard {
    /// Check that every text field is non-empty
    pub fn validate(&self) -> Result<(), CardValidationError> {
        for field in CardField::ALL {
            if self.field(field).is_empty() {
                return Err(CardValidationError::EmptyField(field));
            }
        }
        Ok(())
    }

    /// Read one text field
    pub fn field(&self, field: CardField) -> &str {
        match field {
            CardField::Time => &self.time,
            CardField::Actor => &self.actor,
            CardField::Place => &self.place,
            CardField::Claims => &self.claims,
        }
    }

    /// Build a card at the given position.
    ///
    /// Does not validate; callers run [`NewCard::validate`] first.
    pub fn into_card(self, id: CardId, (x, y): (f64, f64)) -> Card {
        Card {
            id,
            time: self.time,
            actor: self.actor,
            place: self.place,
            claims: self.claims,
            is_lie: self.is_lie,
            x,
            y,
        }
    }
}

/// Partial change to a card; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    /// New timestamp text
    pub time: Option<String>,
    /// New actor label
    pub actor: Option<String>,
    /// New place label
    pub place: Option<String>,
    /// New claim text
    pub claims: Option<String>,
    /// New lie flag
    pub is_lie: Option<bool>,
    /// New horizontal coordinate
    pub x: Option<f64>,
    /// New vertical coordinate
    pub y: Option<f64>,
}

impl CardPatch {
    /// Patch that rewrites a single text field
    pub fn field(field: CardField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            CardField::Time => Self { time: value, ..Self::default() },
            CardField::Actor => Self { actor: value, ..Self::default() },
            CardField::Place => Self { place: value, ..Self::default() },
            CardField::Claims => Self { claims: value, ..Self::default() },
        }
    }

    /// Patch that only flips the lie flag
    pub fn lie(is_lie: bool) -> Self {
        Self {
            is_lie: Some(is_lie),
            ..Self::default()
        }
    }

    /// Patch that moves a card
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.actor.is_none()
            && self.place.is_none()
            && self.claims.is_none()
            && self.is_lie.is_none()
            && self.x.is_none()
            && self.y.is_none()
    }

    /// Apply the patch in place. The id is never touched.
    pub fn apply(&self, card: &mut Card) {
        if let Some(time) = &self.time {
            card.time.clone_from(time);
        }
        if let Some(actor) = &self.actor {
            card.actor.clone_from(actor);
        }
        if let Some(place) = &self.place {
            card.place.clone_from(place);
        }
        if let Some(claims) = &self.claims {
            card.claims.clone_from(claims);
        }
        if let Some(is_lie) = self.is_lie {
            card.is_lie = is_lie;
        }
        if let Some(x) = self.x {
            card.x = x;
        }
        if let Some(y) = self.y {
            card.y = y;
        }
    }
}

/// The two illustrative cards shown on a board with no saved state
pub fn seed_cards() -> Vec<Card> {
    vec![
        Card {
            id: CardId::new("1"),
            time: "2024-01-15T09:00".to_string(),
            actor: "John Smith".to_string(),
            place: "Office Building".to_string(),
            claims: "Was in a meeting with the client".to_string(),
            is_lie: false,
            x: 100.0,
            y: 100.0,
        },
        Card {
            id: CardId::new("2"),
            time: "2024-01-15T14:30".to_string(),
            actor: "Jane Doe".to_string(),
            place: "Coffee Shop".to_string(),
            claims: "Saw the suspect leaving the area".to_string(),
            is_lie: true,
            x: 300.0,
            y: 200.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewCard {
        NewCard {
            time: "2024-03-01T10:15".to_string(),
            actor: "Ana".to_string(),
            place: "Dock".to_string(),
            claims: "Saw a van".to_string(),
            is_lie: false,
        }
    }

    #[test]
    fn test_new_card_requires_every_text_field() {
        assert!(sample().validate().is_ok());

        for field in CardField::ALL {
            let mut fields = sample();
            match field {
                CardField::Time => fields.time.clear(),
                CardField::Actor => fields.actor.clear(),
                CardField::Place => fields.place.clear(),
                CardField::Claims => fields.claims.clear(),
            }
            assert_eq!(
                fields.validate(),
                Err(CardValidationError::EmptyField(field))
            );
        }
    }

    #[test]
    fn test_patch_leaves_id_and_untouched_fields() {
        let mut card = sample().into_card(CardId::new("c1"), (10.0, 20.0));
        CardPatch::field(CardField::Actor, "Ben").apply(&mut card);

        assert_eq!(card.id, CardId::new("c1"));
        assert_eq!(card.actor, "Ben");
        assert_eq!(card.place, "Dock");
        assert_eq!(card.position(), (10.0, 20.0));
    }

    #[test]
    fn test_wire_names_and_legacy_alias() {
        let card = sample().into_card(CardId::new("c1"), (1.5, 2.5));
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["isLie"], false);
        assert_eq!(json["id"], "c1");

        let legacy = serde_json::json!({
            "id": "9",
            "time": "2024-01-01T00:00",
            "actor": "A",
            "place": "P",
            "claims": "C",
            "is_lie": true,
            "x": 0.0,
            "y": 0.0
        });
        let decoded: Card = serde_json::from_value(legacy).unwrap();
        assert!(decoded.is_lie);
    }

    #[test]
    fn test_seed_ids() {
        let seed = seed_cards();
        let ids: Vec<&str> = seed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(seed[1].is_lie);
    }

    #[test]
    fn test_field_parse() {
        assert_eq!(CardField::parse("Actor"), Some(CardField::Actor));
        assert_eq!(CardField::parse("claim"), Some(CardField::Claims));
        assert_eq!(CardField::parse("isLie"), None);
    }
}

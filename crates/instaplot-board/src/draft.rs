//! Staged card edits
//!
//! A draft copies a card's editable fields, accepts any number of changes,
//! and is applied in one update by [`Board::commit_edit`](crate::Board::commit_edit).
//! Dropping a draft discards it.

use instaplot_domain::{Card, CardField, CardId, CardPatch, CardValidationError, NewCard};

/// Pending changes to one card
#[derive(Debug, Clone, PartialEq)]
pub struct CardDraft {
    original: Card,
    fields: NewCard,
}

impl CardDraft {
    pub(crate) fn from_card(card: &Card) -> Self {
        Self {
            original: card.clone(),
            fields: NewCard {
                time: card.time.clone(),
                actor: card.actor.clone(),
                place: card.place.clone(),
                claims: card.claims.clone(),
                is_lie: card.is_lie,
            },
        }
    }

    /// Id of the card being edited
    pub fn id(&self) -> &CardId {
        &self.original.id
    }

    /// Staged value of one text field
    pub fn field(&self, field: CardField) -> &str {
        self.fields.field(field)
    }

    /// Staged lie flag
    pub fn is_lie(&self) -> bool {
        self.fields.is_lie
    }

    /// Stage a text field change
    pub fn set(&mut self, field: CardField, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match field {
            CardField::Time => self.fields.time = value,
            CardField::Actor => self.fields.actor = value,
            CardField::Place => self.fields.place = value,
            CardField::Claims => self.fields.claims = value,
        }
        self
    }

    /// Stage a lie flag change
    pub fn set_lie(&mut self, is_lie: bool) -> &mut Self {
        self.fields.is_lie = is_lie;
        self
    }

    /// Whether anything differs from the original
    pub fn is_dirty(&self) -> bool {
        !self.patch().is_empty()
    }

    /// Check the staged text fields
    pub fn validate(&self) -> Result<(), CardValidationError> {
        self.fields.validate()
    }

    /// Patch holding only the changed fields. Position is never part of it.
    pub fn patch(&self) -> CardPatch {
        let changed = |field: CardField| {
            let staged = self.fields.field(field);
            (staged != self.original.field(field)).then(|| staged.to_string())
        };

        CardPatch {
            time: changed(CardField::Time),
            actor: changed(CardField::Actor),
            place: changed(CardField::Place),
            claims: changed(CardField::Claims),
            is_lie: (self.fields.is_lie != self.original.is_lie).then_some(self.fields.is_lie),
            x: None,
            y: None,
        }
    }
}

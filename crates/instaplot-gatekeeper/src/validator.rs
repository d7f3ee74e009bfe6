//! Per-item validation for bulk sync

use crate::config::{DuplicateIdPolicy, SyncConfig};
use crate::report::{SyncBatch, SyncReport};
use crate::SyncError;
use instaplot_domain::{Card, CardField, CardId};
use rand::Rng;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Reasons an item is excluded from a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The array element is not a JSON object
    NotAnObject,

    /// A required text field is absent or null
    MissingField(CardField),

    /// A required text field is the empty string
    EmptyField(CardField),

    /// A required text field holds a non-string value
    NotText(CardField),

    /// The id repeats an earlier item's id (strict policy only)
    DuplicateId(CardId),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotAnObject => f.write_str("not a JSON object"),
            RejectionReason::MissingField(field) => write!(f, "missing field `{}`", field),
            RejectionReason::EmptyField(field) => write!(f, "field `{}` is empty", field),
            RejectionReason::NotText(field) => write!(f, "field `{}` is not text", field),
            RejectionReason::DuplicateId(id) => write!(f, "duplicate id `{}`", id),
        }
    }
}

/// A rejected item and where it sat in the input array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    /// Zero-based array index
    pub index: usize,

    /// Why the item was rejected
    pub reason: RejectionReason,
}

impl ItemError {
    /// One-based position, as shown to users
    pub fn item_number(&self) -> usize {
        self.index + 1
    }
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item {}: {}", self.item_number(), self.reason)
    }
}

/// The Gatekeeper validates externally supplied cards before a board is
/// replaced with them
#[derive(Debug)]
pub struct Gatekeeper {
    config: SyncConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(SyncConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Parse JSON text and validate it as a card array.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Parse`] when the text is not JSON
    /// - [`SyncError::Format`] when the top level is not an array
    pub fn parse_import(&self, text: &str) -> Result<SyncBatch, SyncError> {
        let value: Value = serde_json::from_str(text)?;
        self.validate_value(&value)
    }

    /// Validate an already-parsed JSON value as a card array.
    ///
    /// Items are validated independently; rejections are collected into the
    /// report rather than aborting the batch.
    pub fn validate_value(&self, value: &Value) -> Result<SyncBatch, SyncError> {
        let items = value
            .as_array()
            .ok_or_else(|| SyncError::Format(json_kind(value)))?;

        let mut rng = rand::thread_rng();
        let mut seen: HashSet<CardId> = HashSet::new();
        let mut cards = Vec::with_capacity(items.len());
        let mut errors = Vec::new();

        for (index, item) in items.iter().enumerate() {
            match self.validate_item(item, &mut rng) {
                Ok(mut card) => {
                    if seen.contains(&card.id) {
                        match self.config.duplicate_ids {
                            DuplicateIdPolicy::Rekey => {
                                let fresh = fresh_id(&seen);
                                warn!("Item {} repeats id {}, re-keyed as {}", index + 1, card.id, fresh);
                                card.id = fresh;
                            }
                            DuplicateIdPolicy::Reject => {
                                warn!("Item {} rejected: duplicate id {}", index + 1, card.id);
                                errors.push(ItemError {
                                    index,
                                    reason: RejectionReason::DuplicateId(card.id),
                                });
                                continue;
                            }
                        }
                    }
                    seen.insert(card.id.clone());
                    cards.push(card);
                }
                Err(reason) => {
                    warn!("Item {} rejected: {}", index + 1, reason);
                    errors.push(ItemError { index, reason });
                }
            }
        }

        debug!(
            "Validated {} items: {} accepted, {} rejected",
            items.len(),
            cards.len(),
            errors.len()
        );

        let report = SyncReport {
            total: items.len(),
            accepted: cards.len(),
            errors,
        };
        Ok(SyncBatch { cards, report })
    }

    /// Validate one array element and fill in defaults.
    pub fn validate_item<R: Rng + ?Sized>(
        &self,
        item: &Value,
        rng: &mut R,
    ) -> Result<Card, RejectionReason> {
        let obj = item.as_object().ok_or(RejectionReason::NotAnObject)?;

        let time = required_text(obj, CardField::Time)?;
        let actor = required_text(obj, CardField::Actor)?;
        let place = required_text(obj, CardField::Place)?;
        let claims = required_text(obj, CardField::Claims)?;

        let id = obj
            .get("id")
            .and_then(id_from_value)
            .unwrap_or_else(CardId::generate);

        // Falsy or non-boolean flags fall back to `false`.
        let is_lie = obj
            .get("isLie")
            .or_else(|| obj.get("is_lie"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let region = &self.config.placement;
        let x = usable_coordinate(obj.get("x")).unwrap_or_else(|| region.random_x(rng));
        let y = usable_coordinate(obj.get("y")).unwrap_or_else(|| region.random_y(rng));

        Ok(Card {
            id,
            time,
            actor,
            place,
            claims,
            is_lie,
            x,
            y,
        })
    }
}

fn required_text(obj: &Map<String, Value>, field: CardField) -> Result<String, RejectionReason> {
    match obj.get(field.as_str()) {
        None | Some(Value::Null) => Err(RejectionReason::MissingField(field)),
        Some(Value::String(s)) if s.is_empty() => Err(RejectionReason::EmptyField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(RejectionReason::NotText(field)),
    }
}

/// Strings are taken verbatim, integers in decimal. Anything else (including
/// the empty string) means "no id supplied".
fn id_from_value(value: &Value) -> Option<CardId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(CardId::new(s.clone())),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(CardId::new(n.to_string())),
        _ => None,
    }
}

/// Zero counts as absent, matching the falsy-default rule for numbers.
fn usable_coordinate(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v != 0.0)
}

fn fresh_id(taken: &HashSet<CardId>) -> CardId {
    loop {
        let id = CardId::generate();
        if !taken.contains(&id) {
            return id;
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

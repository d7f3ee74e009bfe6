//! Axis module - attribute modes and their value domains

use crate::card::{Card, CardField};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Attribute bound to one board axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// Bucket cards by location
    Place,
    /// Bucket cards by person/entity
    Actor,
    /// Spread cards along a continuous timeline
    Time,
}

impl AxisMode {
    /// Every selectable mode
    pub const ALL: [AxisMode; 3] = [AxisMode::Place, AxisMode::Actor, AxisMode::Time];

    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisMode::Place => "place",
            AxisMode::Actor => "actor",
            AxisMode::Time => "time",
        }
    }

    /// Parse a mode from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "place" => Some(AxisMode::Place),
            "actor" => Some(AxisMode::Actor),
            "time" => Some(AxisMode::Time),
            _ => None,
        }
    }

    /// The card field this mode reads
    pub fn field(&self) -> CardField {
        match self {
            AxisMode::Place => CardField::Place,
            AxisMode::Actor => CardField::Actor,
            AxisMode::Time => CardField::Time,
        }
    }

    /// Whether the mode buckets discrete values rather than interpolating
    pub fn is_categorical(&self) -> bool {
        !matches!(self, AxisMode::Time)
    }
}

impl fmt::Display for AxisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown axis mode: {} (expected place|actor|time)", s))
    }
}

/// Ordered value domain of `mode` across `cards`.
///
/// - `Time`: every card's time text, not deduplicated, sorted ascending as
///   strings. One slot per card.
/// - `Place` / `Actor`: distinct values in first-occurrence order. Bucket
///   index is position in this list, so insertion order drives layout.
///
/// # Examples
///
/// ```
/// use instaplot_domain::{domain_for, seed_cards, AxisMode};
///
/// let cards = seed_cards();
/// assert_eq!(domain_for(AxisMode::Actor, &cards), vec!["John Smith", "Jane Doe"]);
/// ```
pub fn domain_for(mode: AxisMode, cards: &[Card]) -> Vec<String> {
    let field = mode.field();

    if mode == AxisMode::Time {
        let mut times: Vec<String> = cards.iter().map(|c| c.field(field).to_string()).collect();
        times.sort();
        return times;
    }

    let mut seen = HashSet::new();
    cards
        .iter()
        .map(|c| c.field(field))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

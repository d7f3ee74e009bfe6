//! Layout engine - deterministic board coordinates from two axis modes
//!
//! A categorical axis (place, actor) places a card at
//! `bucket_index * BUCKET_WIDTH + MARGIN`, where the bucket index is the
//! first-occurrence position of its value (see [`crate::axis::domain_for`]).
//! A time axis interpolates the card's timestamp between the collection's
//! minimum and maximum into a fixed pixel span, also offset by `MARGIN`.
//!
//! Layout reads only card attributes, never current coordinates, so
//! [`organize`] is idempotent: running it twice yields bit-identical output.

use crate::axis::{domain_for, AxisMode};
use crate::card::{Card, CardField};
use crate::timestamp::parse_timestamp;
use std::collections::HashMap;

/// Offset applied to every laid-out coordinate
pub const MARGIN: f64 = 100.0;

/// Distance between adjacent categorical buckets
pub const BUCKET_WIDTH: f64 = 200.0;

/// Pixel span of a horizontal time axis
pub const HORIZONTAL_TIME_SPAN: f64 = 600.0;

/// Pixel span of a vertical time axis
pub const VERTICAL_TIME_SPAN: f64 = 400.0;

/// Which board axis a mode is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardAxis {
    /// x
    Horizontal,
    /// y
    Vertical,
}

impl BoardAxis {
    /// Pixel span a time axis covers in this direction
    pub fn time_span(&self) -> f64 {
        match self {
            BoardAxis::Horizontal => HORIZONTAL_TIME_SPAN,
            BoardAxis::Vertical => VERTICAL_TIME_SPAN,
        }
    }
}

#[derive(Debug, Clone)]
enum AxisScale {
    Timeline {
        min: i64,
        /// `max - min`, or 1 when every parseable time coincides
        range: f64,
        span: f64,
    },
    Buckets {
        field: CardField,
        slots: HashMap<String, usize>,
    },
}

impl AxisScale {
    fn build(mode: AxisMode, axis: BoardAxis, cards: &[Card]) -> Self {
        match mode {
            AxisMode::Time => {
                let mut bounds: Option<(i64, i64)> = None;
                for ms in cards.iter().filter_map(|c| parse_timestamp(&c.time)) {
                    bounds = Some(match bounds {
                        Some((lo, hi)) => (lo.min(ms), hi.max(ms)),
                        None => (ms, ms),
                    });
                }
                let (min, max) = bounds.unwrap_or((0, 0));
                let range = if max == min { 1.0 } else { (max - min) as f64 };
                AxisScale::Timeline {
                    min,
                    range,
                    span: axis.time_span(),
                }
            }
            AxisMode::Place | AxisMode::Actor => {
                let slots = domain_for(mode, cards)
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| (value, index))
                    .collect();
                AxisScale::Buckets {
                    field: mode.field(),
                    slots,
                }
            }
        }
    }

    fn coordinate(&self, card: &Card) -> f64 {
        match self {
            AxisScale::Timeline { min, range, span } => match parse_timestamp(&card.time) {
                Some(ms) => (ms - min) as f64 / range * span + MARGIN,
                None => MARGIN,
            },
            AxisScale::Buckets { field, slots } => {
                // Cards outside the planned collection land one bucket past the end.
                let index = slots
                    .get(card.field(*field))
                    .copied()
                    .unwrap_or(slots.len());
                index as f64 * BUCKET_WIDTH + MARGIN
            }
        }
    }
}

/// Axis scales computed once for a whole collection
///
/// Building the plan is O(n); each [`LayoutPlan::position`] lookup is O(1).
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    x: AxisScale,
    y: AxisScale,
}

impl LayoutPlan {
    /// Plan a layout of `cards` with `x_mode` horizontal and `y_mode` vertical
    pub fn new(cards: &[Card], x_mode: AxisMode, y_mode: AxisMode) -> Self {
        Self {
            x: AxisScale::build(x_mode, BoardAxis::Horizontal, cards),
            y: AxisScale::build(y_mode, BoardAxis::Vertical, cards),
        }
    }

    /// Target coordinates for one card
    pub fn position(&self, card: &Card) -> (f64, f64) {
        (self.x.coordinate(card), self.y.coordinate(card))
    }
}

/// Target coordinates for `card` within the full collection `cards`.
///
/// Convenience for a single lookup; use [`LayoutPlan`] for many.
pub fn position_for(card: &Card, cards: &[Card], x_mode: AxisMode, y_mode: AxisMode) -> (f64, f64) {
    LayoutPlan::new(cards, x_mode, y_mode).position(card)
}

/// Recompute every card's coordinates, preserving collection order.
///
/// # Examples
///
/// ```
/// use instaplot_domain::{organize, seed_cards, AxisMode};
///
/// let cards = organize(&seed_cards(), AxisMode::Place, AxisMode::Time);
/// assert_eq!(cards[0].position(), (100.0, 100.0));
/// assert_eq!(cards[1].position(), (300.0, 500.0));
/// ```
pub fn organize(cards: &[Card], x_mode: AxisMode, y_mode: AxisMode) -> Vec<Card> {
    let plan = LayoutPlan::new(cards, x_mode, y_mode);
    cards
        .iter()
        .map(|card| {
            let (x, y) = plan.position(card);
            Card { x, y, ..card.clone() }
        })
        .collect()
}

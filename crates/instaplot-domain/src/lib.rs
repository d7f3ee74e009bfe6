//! InstaPlot Domain Layer
//!
//! This crate contains the board model and the deterministic layout logic for
//! InstaPlot. It performs no I/O: storage is reached only through the
//! [`traits::BlobStore`] port, which infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Card**: one attributed statement (who claimed what, where, when, and
//!   whether it is believed false) plus its board coordinates
//! - **Axis mode**: the attribute (place, actor, time) bound to one board axis
//! - **Bucket**: the slot one distinct categorical value occupies on an axis
//! - **Organize**: the full recompute of every card's coordinates
//!
//! ## Architecture
//!
//! - [`axis`] resolves the ordered value domain of an attribute
//! - [`layout`] maps cards to coordinates under two axis modes
//! - [`placement`] covers coordinates that do not come from layout
//!   (random initial placement, drag deltas)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod axis;
pub mod card;
pub mod layout;
pub mod placement;
pub mod timestamp;
pub mod traits;

// Re-exports for convenience
pub use axis::{domain_for, AxisMode};
pub use card::{
    seed_cards, Card, CardField, CardId, CardPatch, CardValidationError, NewCard,
};
pub use layout::{organize, position_for, BoardAxis, LayoutPlan};
pub use placement::{drag_target, PlacementRegion};
pub use traits::BlobStore;

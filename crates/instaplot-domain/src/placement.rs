//! Placement outside the layout engine
//!
//! Fresh cards get a uniform random point inside a fixed region so a board
//! never starts with every card stacked on one spot. Drag gestures report a
//! final pointer delta relative to the card's current coordinates.

use crate::card::Card;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rectangle fresh cards are scattered over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRegion {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Default for PlacementRegion {
    /// x in [100, 500), y in [100, 400)
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 400.0,
            height: 300.0,
        }
    }
}

impl PlacementRegion {
    /// Uniform random x coordinate inside the region
    pub fn random_x<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.x + rng.gen::<f64>() * self.width
    }

    /// Uniform random y coordinate inside the region
    pub fn random_y<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.y + rng.gen::<f64>() * self.height
    }

    /// Uniform random point inside the region
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        (self.random_x(rng), self.random_y(rng))
    }

    /// Whether a point lies inside the region (right/bottom edges excluded)
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Where a card lands after a drag that moved the pointer by `(dx, dy)`.
///
/// No bounds are applied; scrolling and clipping belong to the renderer.
pub fn drag_target(card: &Card, dx: f64, dy: f64) -> (f64, f64) {
    (card.x + dx, card.y + dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::seed_cards;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_points_stay_in_region() {
        let region = PlacementRegion::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(region.contains(region.random_point(&mut rng)));
        }
    }

    #[test]
    fn test_drag_target_is_unbounded() {
        let card = &seed_cards()[0];
        assert_eq!(drag_target(card, -250.0, 40.5), (-150.0, 140.5));
    }
}

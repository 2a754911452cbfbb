//! Trait for entities that have a position on the plane.
//!
//! Implemented by [`Food`](super::food::Food) and
//! [`Creature`](super::creature::Creature), so proximity checks can be written
//! once for both.

use ndarray::Array1;

use super::geometric_utils;

/// Trait for entities with a position in 2D space.
pub trait Locatable {
    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32>;

    /// Euclidean distance to another located entity.
    fn distance_to(&self, other: &dyn Locatable) -> f32 {
        geometric_utils::distance(self.pos(), other.pos())
    }
}

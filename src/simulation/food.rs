//! Food items that creatures can consume for energy.

use ndarray::Array1;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use serde::{Deserialize, Serialize};

use super::locatable::Locatable;

/// A passive point resource.
///
/// Consumption is a one-way transition: once consumed a food item has no
/// further effect and is removed by the ecosystem at the end of the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    /// Position in 2D space.
    pub pos: Array1<f32>,
    consumed: bool,
}

impl Food {
    /// Creates an uneaten food item at `pos`.
    pub fn new(pos: Array1<f32>) -> Self {
        Self {
            pos,
            consumed: false,
        }
    }

    /// Creates a food item at a uniformly random position inside the world.
    ///
    /// # Arguments
    ///
    /// * `extent` - World width and height.
    pub fn new_random(extent: &Array1<f32>) -> Self {
        Self::new(Array1::random(2, Uniform::new(0., 1.)) * extent)
    }

    /// Convenience constructor from coordinates.
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Array1::from_vec(vec![x, y]))
    }

    /// Whether the item has been eaten.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Marks the item eaten. Calling it again has no effect.
    pub fn consume(&mut self) {
        self.consumed = true;
    }
}

impl Locatable for Food {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }
}

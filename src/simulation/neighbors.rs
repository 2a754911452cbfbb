//! Mutable view of "everyone but me" inside the population.
//!
//! An update borrows the creature being processed and every other creature
//! at the same time: fights and contagion write to neighbors synchronously.
//! Splitting the population slice around the current index gives both
//! borrows without copying and without any index ever being invalidated.

use super::creature::Creature;

/// All creatures except the one currently being updated.
///
/// Indices run over the creatures before the current one, then the ones
/// after it. They are only meaningful for the update that created the view.
#[derive(Debug)]
pub struct Neighbors<'a> {
    before: &'a mut [Creature],
    after: &'a mut [Creature],
}

impl<'a> Neighbors<'a> {
    /// Splits `population` into the creature at `index` and its neighbors.
    ///
    /// Returns `None` when `index` is out of bounds.
    pub fn split(population: &'a mut [Creature], index: usize) -> Option<(&'a mut Creature, Self)> {
        if index >= population.len() {
            return None;
        }
        let (before, rest) = population.split_at_mut(index);
        let (current, after) = rest.split_first_mut()?;
        Some((current, Self { before, after }))
    }

    /// A view with no neighbors, for a creature alone in the world.
    pub fn none() -> Neighbors<'static> {
        Neighbors {
            before: &mut [],
            after: &mut [],
        }
    }

    /// Number of neighbors.
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    /// Whether there are no neighbors.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbor at `index`.
    pub fn get(&self, index: usize) -> Option<&Creature> {
        if index < self.before.len() {
            self.before.get(index)
        } else {
            self.after.get(index - self.before.len())
        }
    }

    /// Mutable neighbor at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Creature> {
        if index < self.before.len() {
            self.before.get_mut(index)
        } else {
            self.after.get_mut(index - self.before.len())
        }
    }

    /// Iterates neighbors in population order.
    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.before.iter().chain(self.after.iter())
    }

    /// Iterates neighbors mutably in population order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.before.iter_mut().chain(self.after.iter_mut())
    }
}

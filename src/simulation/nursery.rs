//! Pending-birth buffer and identity issuance.
//!
//! Children conceived during a tick are parked here and spliced into the
//! population only after every creature has been updated, so the population
//! vector never grows while it is being iterated and a newborn's first real
//! update happens on the following tick.

use serde::{Deserialize, Serialize};

use super::creature::{Creature, CreatureId};
use super::names::NameGenerator;
use super::noise::Noise;

/// Issues ids and names, and holds children until the tick ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nursery {
    next_id: u64,
    names: NameGenerator,
    pending: Vec<Creature>,
}

impl Nursery {
    /// Creates an empty nursery issuing ids from zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a fresh id and name.
    pub fn register(&mut self, noise: &mut impl Noise) -> (CreatureId, String) {
        let id = CreatureId(self.next_id);
        self.next_id += 1;
        (id, self.names.generate(noise))
    }

    /// Parks a newborn until the end of the tick.
    pub fn admit(&mut self, child: Creature) {
        self.pending.push(child);
    }

    /// Children waiting to join the population.
    pub fn pending(&self) -> &[Creature] {
        &self.pending
    }

    /// Hands over all waiting children.
    pub fn discharge(&mut self) -> std::vec::Drain<'_, Creature> {
        self.pending.drain(..)
    }
}

//! Events emitted while a tick runs.
//!
//! Creature updates report what happened (meals, fights, births, infections)
//! as [`SimulationEvent`]s. The ecosystem queues them and applies them to its
//! statistics and event log once the tick is complete.

use tracing::debug;

use super::creature::CreatureId;
use super::event_log::{EventKind, EventLog};
use super::stats::PopulationStats;

/// Something notable that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A creature ate a food item.
    FoodConsumed {
        /// The creature that ate.
        creature: CreatureId,
        /// Index of the food item in the food vector during that tick.
        food_index: usize,
    },
    /// Two creatures fought.
    Fought {
        /// The winner.
        winner: CreatureId,
        /// The loser.
        loser: CreatureId,
        /// Whether the fight was over a meal rather than mating rights.
        over_food: bool,
    },
    /// A child was conceived; it joins the population when the tick ends.
    Born {
        /// The child.
        child: CreatureId,
        /// The initiating parent.
        parent: CreatureId,
        /// The other parent.
        partner: CreatureId,
    },
    /// Sickness spread to a neighbor.
    Infected {
        /// The sick creature.
        carrier: CreatureId,
        /// The neighbor that lost health.
        victim: CreatureId,
    },
    /// A creature died and was removed.
    Died {
        /// The dead creature.
        creature: CreatureId,
        /// Its name.
        name: String,
        /// Its age at death in seconds.
        age: f32,
    },
}

/// Queue for collecting events during a tick.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SimulationEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SimulationEvent> {
        self.events.drain(..)
    }
}

impl Extend<SimulationEvent> for EventQueue {
    fn extend<T: IntoIterator<Item = SimulationEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

/// Applies all queued events to statistics and the event log.
pub fn apply_events(
    stats: &mut PopulationStats,
    log: &mut EventLog,
    time: f32,
    queue: &mut EventQueue,
) {
    for event in queue.drain() {
        stats.record(&event);

        match event {
            SimulationEvent::FoodConsumed { .. } => {}
            SimulationEvent::Fought {
                winner,
                loser,
                over_food,
            } => {
                let reason = if over_food { "food" } else { "a mate" };
                debug!(%winner, %loser, over_food, "fight");
                let description = format!("{winner} beat {loser} over {reason}");
                log.log(time, description, EventKind::Combat);
            }
            SimulationEvent::Born {
                child,
                parent,
                partner,
            } => {
                debug!(%child, %parent, %partner, "birth");
                log.log(
                    time,
                    format!("{child} born to {parent} and {partner}"),
                    EventKind::Reproduction,
                );
            }
            SimulationEvent::Infected { carrier, victim } => {
                debug!(%carrier, %victim, "infection");
                let description = format!("{carrier} infected {victim}");
                log.log(time, description, EventKind::Infection);
            }
            SimulationEvent::Died {
                creature,
                name,
                age,
            } => {
                debug!(%creature, name = %name, age, "death");
                log.log(
                    time,
                    format!("{name} ({creature}) died aged {age:.1}s"),
                    EventKind::Death,
                );
            }
        }
    }
}

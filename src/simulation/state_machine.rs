//! Priority-ordered behavioral state machine.
//!
//! [`decide`] reads a creature, its neighbors, and the food list and returns
//! a [`Transition`]: the next state plus at most one [`Effect`] on another
//! creature. It mutates nothing. [`apply`] then commits the transition,
//! resolving the effect against the neighbor it names and spreading
//! contagion when the creature ends up sick.
//!
//! Rules, first match wins:
//! 1. Eating continues until the eat timer exceeds `eat_duration`.
//! 2. Hungry: hunt. With no uneaten food left anywhere, contest a nearby
//!    eating creature when the odds favour it.
//! 3. Critically hurt: sick.
//! 4. Fertile: mate with the first eligible opposite-sex neighbor in range.
//!    A female first fights that male when the odds favour her.
//! 5. Hurt: sick.
//! 6. Otherwise: wander.

use tracing::trace;

use super::creature::{Creature, CreatureState};
use super::events::SimulationEvent;
use super::food::Food;
use super::interaction::{self, FightResult};
use super::locatable::Locatable;
use super::neighbors::Neighbors;
use super::noise::Noise;
use super::nursery::Nursery;
use super::params::Params;

/// Fights are only started when the initiator's odds beat this.
const ENGAGE_THRESHOLD: f32 = 0.5;

/// Side effect of a transition on another creature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Fight the neighbor at `opponent`.
    Fight {
        /// Neighbor index of the opponent.
        opponent: usize,
        /// Pre-drawn outcome.
        result: FightResult,
        /// A hungry creature contesting a meal; the winner steals food energy.
        over_food: bool,
    },
    /// Conceive a child with the neighbor at `partner`.
    Mate {
        /// Neighbor index of the partner.
        partner: usize,
    },
}

/// Next state of a creature and what entering it does to others.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State to enter.
    pub state: CreatureState,
    /// Eat timer after this tick.
    pub eat_timer: f32,
    /// Effect on another creature.
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(state: CreatureState) -> Self {
        Self {
            state,
            eat_timer: 0.0,
            effect: None,
        }
    }

    fn with(state: CreatureState, effect: Effect) -> Self {
        Self {
            state,
            eat_timer: 0.0,
            effect: Some(effect),
        }
    }
}

/// Chooses the next state of `creature`.
///
/// Draws fight noise and fight rolls from `noise`; otherwise pure.
pub fn decide(
    creature: &Creature,
    neighbors: &Neighbors<'_>,
    food: &[Food],
    dt: f32,
    params: &Params,
    noise: &mut impl Noise,
) -> Transition {
    if creature.state == CreatureState::Eating {
        let eat_timer = creature.eat_timer + dt;
        if eat_timer > params.eat_duration {
            return Transition::to(CreatureState::Wandering);
        }
        return Transition {
            state: CreatureState::Eating,
            eat_timer,
            effect: None,
        };
    }

    if creature.energy < params.hungry_threshold {
        let food_left = food.iter().any(|f| !f.is_consumed());
        if !food_left {
            if let Some(fight) = contest_meal(creature, neighbors, params, noise) {
                return Transition::with(CreatureState::Fighting, fight);
            }
        }
        return Transition::to(CreatureState::Hunting);
    }

    if creature.health < params.critical_health {
        return Transition::to(CreatureState::Sick);
    }

    if creature.is_fertile(params) {
        if let Some(effect) = court(creature, neighbors, params, noise) {
            let state = match effect {
                Effect::Fight { .. } => CreatureState::Fighting,
                Effect::Mate { .. } => CreatureState::Mating,
            };
            return Transition::with(state, effect);
        }
        return Transition::to(CreatureState::Wandering);
    }

    if creature.health < params.low_health {
        return Transition::to(CreatureState::Sick);
    }

    Transition::to(CreatureState::Wandering)
}

/// First eating neighbor within fighting range that the creature expects to beat.
fn contest_meal(
    creature: &Creature,
    neighbors: &Neighbors<'_>,
    params: &Params,
    noise: &mut impl Noise,
) -> Option<Effect> {
    let radius = creature.size * params.fight_radius_factor;

    for (i, other) in neighbors.iter().enumerate() {
        if !other.is_alive() || other.state != CreatureState::Eating {
            continue;
        }
        if creature.distance_to(other) >= radius {
            continue;
        }

        let p = interaction::fight_probability(creature.strength, other.strength, params, noise);
        if p > ENGAGE_THRESHOLD {
            return Some(Effect::Fight {
                opponent: i,
                result: interaction::resolve_fight(p, params, noise),
                over_food: true,
            });
        }
    }

    None
}

/// First eligible partner in range, or a fight with him.
fn court(
    creature: &Creature,
    neighbors: &Neighbors<'_>,
    params: &Params,
    noise: &mut impl Noise,
) -> Option<Effect> {
    let radius = creature.size * params.mating_radius_factor;

    for (i, other) in neighbors.iter().enumerate() {
        if !other.is_alive() || other.sex == creature.sex || !other.is_fertile(params) {
            continue;
        }
        if creature.distance_to(other) >= radius {
            continue;
        }

        if !creature.is_male() {
            let p =
                interaction::fight_probability(creature.strength, other.strength, params, noise);
            if p > ENGAGE_THRESHOLD {
                return Some(Effect::Fight {
                    opponent: i,
                    result: interaction::resolve_fight(p, params, noise),
                    over_food: false,
                });
            }
        }

        return Some(Effect::Mate { partner: i });
    }

    None
}

/// Commits `transition` to `creature` and resolves its effect.
///
/// Fight deltas and contagion are written straight into the neighbors.
/// A conceived child is parked in `nursery`.
pub fn apply(
    creature: &mut Creature,
    neighbors: &mut Neighbors<'_>,
    transition: Transition,
    params: &Params,
    noise: &mut impl Noise,
    nursery: &mut Nursery,
) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    trace!(creature = %creature.id, from = %creature.state, to = %transition.state, "transition");
    creature.state = transition.state;
    creature.eat_timer = transition.eat_timer;

    match transition.effect {
        Some(Effect::Fight {
            opponent,
            result,
            over_food,
        }) => {
            if let Some(opponent) = neighbors.get_mut(opponent) {
                result.apply(creature, opponent, params);
                if over_food && result.attacker_won {
                    creature.gain_energy(params.food_energy * params.stolen_food_ratio, params);
                }
                let (winner, loser) = result.winner_loser(creature.id, opponent.id);
                events.push(SimulationEvent::Fought {
                    winner,
                    loser,
                    over_food,
                });
            }
        }
        Some(Effect::Mate { partner }) => {
            if let Some(partner) = neighbors.get(partner) {
                let (id, name) = nursery.register(noise);
                let child = interaction::reproduce(creature, partner, id, name, params, noise);
                events.push(SimulationEvent::Born {
                    child: child.id,
                    parent: creature.id,
                    partner: partner.id,
                });
                nursery.admit(child);
                creature.energy *= params.reproduction_energy_factor;
            }
        }
        None => {}
    }

    if creature.state == CreatureState::Sick {
        for victim in interaction::spread_contagion(creature, neighbors, params, noise) {
            events.push(SimulationEvent::Infected {
                carrier: creature.id,
                victim,
            });
        }
    }

    events
}

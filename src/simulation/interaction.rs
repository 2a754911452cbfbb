//! Creature-to-creature interactions: fights, reproduction, and contagion.
//!
//! Fight resolution and reproduction are pure functions of their inputs plus
//! the draws they take from [`Noise`]; applying their results to creatures is
//! a separate step.

use serde::{Deserialize, Serialize};

use super::creature::{Creature, CreatureId, CreatureState, Sex, Traits};
use super::geometric_utils;
use super::locatable::Locatable;
use super::neighbors::Neighbors;
use super::noise::Noise;
use super::params::Params;

/// Probability that a creature of `strength` beats one of `opponent_strength`.
///
/// `0.5` for equal strengths, shifted by the strength difference relative to
/// twice the maximum strength, plus uniform noise of `±fight_noise`, clamped
/// to `[0, 1]`.
pub fn fight_probability(
    strength: f32,
    opponent_strength: f32,
    params: &Params,
    noise: &mut impl Noise,
) -> f32 {
    let base = 0.5 + (strength - opponent_strength) / (2.0 * params.max_strength);
    (base + noise.spread(params.fight_noise)).clamp(0.0, 1.0)
}

/// Energy and health change for one side of a fight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceDelta {
    /// Energy change.
    pub energy: f32,
    /// Health change.
    pub health: f32,
}

/// Outcome of a fight, seen from the creature that started it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FightResult {
    /// Whether the initiator won.
    pub attacker_won: bool,
    /// Change applied to the initiator.
    pub attacker: ResourceDelta,
    /// Change applied to the opponent.
    pub defender: ResourceDelta,
}

impl FightResult {
    /// Winner bonus and loser penalty for the given outcome.
    pub fn new(attacker_won: bool, params: &Params) -> Self {
        let win = ResourceDelta {
            energy: params.fight_win_energy,
            health: params.fight_win_health,
        };
        let loss = ResourceDelta {
            energy: -params.fight_loss_energy,
            health: -params.fight_loss_health,
        };
        if attacker_won {
            Self {
                attacker_won,
                attacker: win,
                defender: loss,
            }
        } else {
            Self {
                attacker_won,
                attacker: loss,
                defender: win,
            }
        }
    }

    /// Applies the deltas and records the fight on the initiator.
    ///
    /// Losses are not clamped; a loser can be driven to death or starvation.
    /// Gains respect the energy cap.
    pub fn apply(&self, attacker: &mut Creature, defender: &mut Creature, params: &Params) {
        apply_delta(attacker, self.attacker, params);
        apply_delta(defender, self.defender, params);
        attacker.time_since_last_fight = 0.0;
        attacker.last_fight_opponent = Some(defender.id);
    }

    /// Ids of winner and loser.
    pub fn winner_loser(
        &self,
        attacker: CreatureId,
        defender: CreatureId,
    ) -> (CreatureId, CreatureId) {
        if self.attacker_won {
            (attacker, defender)
        } else {
            (defender, attacker)
        }
    }
}

fn apply_delta(creature: &mut Creature, delta: ResourceDelta, params: &Params) {
    creature.energy = (creature.energy + delta.energy).min(params.max_energy);
    creature.health += delta.health;
}

/// Decides a fight with a single uniform draw against `win_probability`.
pub fn resolve_fight(win_probability: f32, params: &Params, noise: &mut impl Noise) -> FightResult {
    FightResult::new(noise.roll() < win_probability, params)
}

/// Averages the parents' traits and mutates each by up to `±mutation_range`.
pub fn inherit_traits(
    a: &Creature,
    b: &Creature,
    params: &Params,
    noise: &mut impl Noise,
) -> Traits {
    let mut mutate = |x: f32, y: f32| (x + y) / 2.0 * (1.0 + noise.spread(params.mutation_range));
    Traits {
        strength: mutate(a.strength, b.strength),
        speed: mutate(a.speed, b.speed),
        metabolism: mutate(a.metabolism, b.metabolism),
    }
    .clamped(params)
}

/// Builds the child of `parent` and `partner`.
///
/// The child appears at the parents' midpoint with the initiating parent's
/// size, inherited traits, a random sex, and full health and energy. Neither
/// parent is modified.
pub fn reproduce(
    parent: &Creature,
    partner: &Creature,
    id: CreatureId,
    name: String,
    params: &Params,
    noise: &mut impl Noise,
) -> Creature {
    let traits = inherit_traits(parent, partner, params, noise);
    let sex = Sex::random(noise);
    let pos = geometric_utils::midpoint(&parent.pos, &partner.pos);
    Creature::new(id, name, sex, pos, parent.size, traits, params)
}

/// Spreads sickness from `carrier` to nearby neighbors.
///
/// Each neighbor within `contagion_radius_factor × size` is hit with
/// probability `infection_chance`, losing `infection_damage` health. A hit
/// neighbor that drops below critical health becomes sick immediately.
///
/// Returns the ids of infected neighbors.
pub fn spread_contagion(
    carrier: &Creature,
    neighbors: &mut Neighbors<'_>,
    params: &Params,
    noise: &mut impl Noise,
) -> Vec<CreatureId> {
    let radius = carrier.size * params.contagion_radius_factor;
    let mut infected = Vec::new();

    for other in neighbors.iter_mut() {
        if !other.is_alive() || carrier.distance_to(&*other) >= radius {
            continue;
        }
        if noise.roll() < params.infection_chance {
            other.health -= params.infection_damage;
            if other.health < params.critical_health {
                other.state = CreatureState::Sick;
            }
            infected.push(other.id);
        }
    }

    infected
}

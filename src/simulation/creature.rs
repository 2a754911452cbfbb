//! Creature state, traits, and lifecycle.
//!
//! A creature carries three resources (health, energy, age), three bounded
//! traits (strength, speed, metabolism), a growing body size, kinematic state,
//! and exactly one active [`CreatureState`].

use ndarray::Array1;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::locatable::Locatable;
use super::noise::Noise;
use super::params::Params;

/// Stable identifier of a creature within one ecosystem.
///
/// Used instead of references for anything that outlives a single update,
/// since the population vector is reordered and truncated every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(pub u64);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Biological sex. Mating requires opposite sexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Sex {
    /// Draws a sex with equal probability.
    pub fn random(noise: &mut impl Noise) -> Self {
        if noise.coin() { Sex::Male } else { Sex::Female }
    }
}

/// Behavioral state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CreatureState {
    /// Default random walk.
    #[default]
    Wandering,
    /// Seeking food, or contesting an eating creature when none is left.
    Hunting,
    /// Reproduced this tick.
    Mating,
    /// Fought this tick.
    Fighting,
    /// Consuming a meal; lasts `eat_duration`.
    Eating,
    /// Low on health; spreads contagion.
    Sick,
}

impl CreatureState {
    /// States in which a creature does not move.
    pub fn is_stationary(self) -> bool {
        matches!(
            self,
            CreatureState::Eating | CreatureState::Fighting | CreatureState::Mating
        )
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            CreatureState::Wandering => "Wandering",
            CreatureState::Hunting => "Hunting",
            CreatureState::Mating => "Mating",
            CreatureState::Fighting => "Fighting",
            CreatureState::Eating => "Eating",
            CreatureState::Sick => "Sick",
        }
    }
}

impl fmt::Display for CreatureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three bounded heritable traits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    /// Fighting power, in `[min_strength, max_strength]`.
    pub strength: f32,
    /// Speed trait, in `[min_speed, max_speed]`.
    pub speed: f32,
    /// Energy burn multiplier, in `[min_metabolism, max_metabolism]`.
    pub metabolism: f32,
}

impl Traits {
    /// Draws every trait uniformly within its bounds.
    pub fn random(params: &Params, noise: &mut impl Noise) -> Self {
        Self {
            strength: noise.between(params.min_strength, params.max_strength),
            speed: noise.between(params.min_speed, params.max_speed),
            metabolism: noise.between(params.min_metabolism, params.max_metabolism),
        }
    }

    /// Re-applies the trait bounds.
    pub fn clamped(self, params: &Params) -> Self {
        Self {
            strength: params.clamp_strength(self.strength),
            speed: params.clamp_speed(self.speed),
            metabolism: params.clamp_metabolism(self.metabolism),
        }
    }
}

/// A simulated creature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    /// Unique identifier.
    pub id: CreatureId,
    /// Unique human-readable name.
    pub name: String,
    /// Biological sex.
    pub sex: Sex,
    /// Health. Dies at or below zero; not clamped downward.
    pub health: f32,
    /// Energy, capped at `max_energy`. Goes negative when starving.
    pub energy: f32,
    /// Time alive in simulation seconds.
    pub age: f32,
    /// Body size; grows with every meal.
    pub size: f32,
    /// Fighting power.
    pub strength: f32,
    /// Speed trait.
    pub speed: f32,
    /// Energy burn multiplier.
    pub metabolism: f32,
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Velocity in 2D space.
    pub vel: Array1<f32>,
    /// Facing angle in radians.
    pub rot: f32,
    /// Active behavioral state.
    pub state: CreatureState,
    /// Seconds spent in the current meal.
    pub eat_timer: f32,
    /// Seconds since this creature last started a fight.
    pub time_since_last_fight: f32,
    /// Last creature this one fought; may no longer exist.
    pub last_fight_opponent: Option<CreatureId>,
    /// Presentation-only selection flag.
    pub selected: bool,
}

impl Creature {
    /// Creates a newborn at `pos` with full health and energy.
    pub fn new(
        id: CreatureId,
        name: String,
        sex: Sex,
        pos: Array1<f32>,
        size: f32,
        traits: Traits,
        params: &Params,
    ) -> Self {
        Self {
            id,
            name,
            sex,
            health: params.initial_health,
            energy: params.max_energy,
            age: 0.0,
            size,
            strength: traits.strength,
            speed: traits.speed,
            metabolism: traits.metabolism,
            pos,
            vel: Array1::zeros(2),
            rot: 0.0,
            state: CreatureState::Wandering,
            eat_timer: 0.0,
            time_since_last_fight: 0.0,
            last_fight_opponent: None,
            selected: false,
        }
    }

    /// Creates a seeded creature at a random position with random traits.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier
    /// * `name` - Unique name
    /// * `extent` - World width and height
    /// * `params` - Simulation parameters (trait bounds, initial size)
    /// * `noise` - Randomness for sex and traits
    pub fn new_random(
        id: CreatureId,
        name: String,
        extent: &Array1<f32>,
        params: &Params,
        noise: &mut impl Noise,
    ) -> Self {
        let sex = Sex::random(noise);
        let traits = Traits::random(params, noise);
        let pos = Array1::random(2, Uniform::new(0., 1.)) * extent;
        Self::new(id, name, sex, pos, params.initial_size, traits, params)
    }

    /// Alive while health is positive.
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Whether the creature is male.
    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    /// Whether the presentation layer has this creature selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Sets the presentation selection flag.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Energy above the mating threshold and old enough.
    pub fn is_fertile(&self, params: &Params) -> bool {
        self.energy > params.mating_energy && self.age > params.mating_age
    }

    /// Ages the creature and burns energy; starvation erodes health.
    pub fn metabolize(&mut self, dt: f32, params: &Params) {
        self.age += dt;
        self.time_since_last_fight += dt;
        self.energy -= dt * params.energy_consumption_rate * self.metabolism;

        if self.energy < 0.0 {
            self.health -= dt * params.health_decay_rate;
        }
    }

    /// Adds energy without exceeding the cap.
    pub fn gain_energy(&mut self, amount: f32, params: &Params) {
        self.energy = (self.energy + amount).min(params.max_energy);
    }

    /// Applies one meal: energy, growth, trait drift, and the eating state.
    pub fn feed(&mut self, params: &Params) {
        self.gain_energy(params.food_energy, params);
        self.size += params.food_grow_size;
        self.speed = params.clamp_speed(self.speed * params.feeding_speed_factor);
        self.strength = params.clamp_strength(self.strength * params.feeding_strength_factor);
        self.state = CreatureState::Eating;
        self.eat_timer = 0.0;
        self.vel.fill(0.0);
    }
}

impl Locatable for Creature {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }
}

//! Simulation parameters.
//!
//! Every constant the engine consults lives here so a run can be tuned from a
//! JSON file without recompiling. [`Params::default`] reproduces the reference
//! tuning.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating [`Params`].
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The parameter file could not be read.
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),
    /// The parameter file is not valid JSON for [`Params`].
    #[error("failed to parse parameter file: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range or inconsistent with another value.
    #[error("invalid parameter `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: &'static str,
    },
}

/// Simulation parameters that control creature behavior and the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Simulation area width.
    pub world_width: f32,
    /// Simulation area height.
    pub world_height: f32,

    /// Health every creature starts with.
    pub initial_health: f32,
    /// Starting energy and the hard cap on energy.
    pub max_energy: f32,
    /// Body size of seeded creatures.
    pub initial_size: f32,
    /// Lower bound of the strength trait.
    pub min_strength: f32,
    /// Upper bound of the strength trait.
    pub max_strength: f32,
    /// Lower bound of the speed trait.
    pub min_speed: f32,
    /// Upper bound of the speed trait.
    pub max_speed: f32,
    /// Lower bound of the metabolism trait.
    pub min_metabolism: f32,
    /// Upper bound of the metabolism trait.
    pub max_metabolism: f32,

    /// Below this energy a creature hunts.
    pub hungry_threshold: f32,
    /// Below this health a creature is sick regardless of mating eligibility.
    pub critical_health: f32,
    /// Below this health a creature that cannot mate rests as sick.
    pub low_health: f32,
    /// Energy required (strictly above) to mate.
    pub mating_energy: f32,
    /// Age in seconds required (strictly above) to mate.
    pub mating_age: f32,

    /// Displacement multiplier applied to velocity.
    pub base_movement_speed: f32,
    /// Velocity magnitude cap.
    pub max_velocity: f32,
    /// Velocity multiplier applied on wall contact, in (-1, 0].
    pub boundary_bounce: f32,
    /// Steering added per tick towards the nearest food while hunting.
    pub food_seek_force: f32,
    /// Half-width of the uniform velocity jitter applied while not hunting.
    pub wander_jitter: f32,
    /// Minimum velocity magnitude for the facing angle to follow movement.
    pub rotation_threshold: f32,

    /// Energy burnt per second, scaled by metabolism.
    pub energy_consumption_rate: f32,
    /// Health lost per second while energy is negative.
    pub health_decay_rate: f32,

    /// Energy granted by one food item.
    pub food_energy: f32,
    /// Diameter used for food contact checks.
    pub food_size: f32,
    /// Size gained per meal.
    pub food_grow_size: f32,
    /// Seconds between food spawn events.
    pub food_spawn_interval: f32,
    /// Items created per spawn event.
    pub food_spawn_count: usize,
    /// Speed multiplier applied per meal.
    pub feeding_speed_factor: f32,
    /// Strength multiplier applied per meal.
    pub feeding_strength_factor: f32,

    /// Seconds a creature stays in the eating state.
    pub eat_duration: f32,
    /// Length of one fixed simulation tick in seconds.
    pub physics_timestep: f32,

    /// Fight/steal radius as a multiple of creature size.
    pub fight_radius_factor: f32,
    /// Mating radius as a multiple of creature size.
    pub mating_radius_factor: f32,
    /// Contagion radius as a multiple of creature size.
    pub contagion_radius_factor: f32,

    /// Half-width of the uniform noise added to the fight probability.
    pub fight_noise: f32,
    /// Energy gained by a fight winner.
    pub fight_win_energy: f32,
    /// Health gained by a fight winner.
    pub fight_win_health: f32,
    /// Energy lost by a fight loser.
    pub fight_loss_energy: f32,
    /// Health lost by a fight loser.
    pub fight_loss_health: f32,
    /// Fraction of `food_energy` a hungry winner steals from an eating loser.
    pub stolen_food_ratio: f32,

    /// Half-width of the relative mutation applied to each inherited trait.
    pub mutation_range: f32,
    /// Energy multiplier paid by the initiating parent.
    pub reproduction_energy_factor: f32,

    /// Per-neighbor, per-tick probability that sickness spreads.
    pub infection_chance: f32,
    /// Health removed from an infected neighbor.
    pub infection_damage: f32,

    /// Creatures seeded at start.
    pub initial_creature_count: usize,

    /// Lowest allowed simulation speed multiplier.
    pub min_sim_speed: f32,
    /// Highest allowed simulation speed multiplier.
    pub max_sim_speed: f32,
    /// Factor applied by one speed-up or slow-down request.
    pub sim_speed_step: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_width: 1200.0,
            world_height: 800.0,

            initial_health: 100.0,
            max_energy: 100.0,
            initial_size: 10.0,
            min_strength: 40.0,
            max_strength: 100.0,
            min_speed: 0.5,
            max_speed: 1.2,
            min_metabolism: 0.5,
            max_metabolism: 1.5,

            hungry_threshold: 50.0,
            critical_health: 30.0,
            low_health: 70.0,
            mating_energy: 50.0,
            mating_age: 5.0,

            base_movement_speed: 30.0,
            max_velocity: 2.0,
            boundary_bounce: -0.8,
            food_seek_force: 0.5,
            wander_jitter: 0.2,
            rotation_threshold: 0.1,

            energy_consumption_rate: 10.0,
            health_decay_rate: 20.0,

            food_energy: 100.0,
            food_size: 6.0,
            food_grow_size: 0.5,
            food_spawn_interval: 1.0,
            food_spawn_count: 5,
            feeding_speed_factor: 0.95,
            feeding_strength_factor: 1.05,

            eat_duration: 0.2,
            physics_timestep: 1.0 / 60.0,

            fight_radius_factor: 2.0,
            mating_radius_factor: 3.0,
            contagion_radius_factor: 2.0,

            fight_noise: 0.10,
            fight_win_energy: 10.0,
            fight_win_health: 5.0,
            fight_loss_energy: 15.0,
            fight_loss_health: 10.0,
            stolen_food_ratio: 0.8,

            mutation_range: 0.10,
            reproduction_energy_factor: 0.7,

            infection_chance: 0.10,
            infection_damage: 5.0,

            initial_creature_count: 100,

            min_sim_speed: 0.125,
            max_sim_speed: 100.0,
            sim_speed_step: 1.05,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ParamsError {
    ParamsError::Invalid { field, reason }
}

impl Params {
    /// Loads parameters from a JSON file and validates them.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks that the parameters describe a runnable simulation.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(invalid("world_width", "world dimensions must be positive"));
        }
        let shorter_side = self.world_width.min(self.world_height);
        if self.initial_size <= 0.0 || self.initial_size >= shorter_side {
            return Err(invalid("initial_size", "must fit inside the world"));
        }
        if self.max_energy <= 0.0 {
            return Err(invalid("max_energy", "must be positive"));
        }
        if self.min_strength > self.max_strength || self.max_strength <= 0.0 {
            return Err(invalid("max_strength", "bounds inverted or non-positive"));
        }
        if self.min_speed > self.max_speed {
            return Err(invalid("max_speed", "bounds inverted"));
        }
        if self.min_metabolism > self.max_metabolism {
            return Err(invalid("max_metabolism", "bounds inverted"));
        }
        if self.critical_health > self.low_health {
            return Err(invalid("critical_health", "must not exceed low_health"));
        }
        if !(-1.0 < self.boundary_bounce && self.boundary_bounce <= 0.0) {
            return Err(invalid("boundary_bounce", "must lie in (-1, 0]"));
        }
        if self.physics_timestep <= 0.0 {
            return Err(invalid("physics_timestep", "must be positive"));
        }
        if self.food_spawn_interval <= 0.0 {
            return Err(invalid("food_spawn_interval", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.infection_chance) {
            return Err(invalid("infection_chance", "must be a probability"));
        }
        if !(0.0..=1.0).contains(&self.reproduction_energy_factor) {
            return Err(invalid("reproduction_energy_factor", "must lie in [0, 1]"));
        }
        if self.min_sim_speed <= 0.0 || self.min_sim_speed > self.max_sim_speed {
            return Err(invalid("min_sim_speed", "must be in (0, max_sim_speed]"));
        }
        if self.sim_speed_step <= 1.0 {
            return Err(invalid("sim_speed_step", "must be greater than 1"));
        }
        Ok(())
    }

    /// Clamps a strength value to its trait bounds.
    pub fn clamp_strength(&self, value: f32) -> f32 {
        value.clamp(self.min_strength, self.max_strength)
    }

    /// Clamps a speed value to its trait bounds.
    pub fn clamp_speed(&self, value: f32) -> f32 {
        value.clamp(self.min_speed, self.max_speed)
    }

    /// Clamps a metabolism value to its trait bounds.
    pub fn clamp_metabolism(&self, value: f32) -> f32 {
        value.clamp(self.min_metabolism, self.max_metabolism)
    }
}

//! # Critters - Agent-Based Life Simulation
//!
//! Autonomous creatures move on a bounded 2D plane, eat spawned food, fight,
//! mate, and fall sick, driven by their health, energy, and age and by three
//! heritable traits (strength, speed, metabolism).
//!
//! ## Features
//!
//! - Priority-ordered behavioral state machine (wandering, hunting, eating,
//!   mating, fighting, sick)
//! - Nearest-food search with first-fit consumption
//! - Strength-weighted fights with noisy odds
//! - Sexual reproduction with trait averaging and bounded mutation
//! - Contagion spreading from sick creatures to their neighbors
//! - Fixed-timestep clock with a simulation speed multiplier
//!
//! ## Core Modules
//!
//! - [`simulation::creature`] - Creature state and traits
//! - [`simulation::state_machine`] - Next-state decision and its effects
//! - [`simulation::interaction`] - Fights, reproduction, and contagion
//! - [`simulation::movement`] - Velocity integration and wall bounces
//! - [`simulation::ecosystem`] - Population loop driver

/// Core simulation logic and data structures.
pub mod simulation {
    /// Creature state, traits, and lifecycle.
    pub mod creature;
    /// Population loop driver with a fixed-timestep clock.
    pub mod ecosystem;
    /// Bounded log of recent notable events.
    pub mod event_log;
    /// Events emitted during a tick and their application.
    pub mod events;
    /// Food items that creatures can consume.
    pub mod food;
    /// Nearest-food search and consumption.
    pub mod foraging;
    /// Geometric utility functions for distance calculations.
    pub mod geometric_utils;
    /// Fights, reproduction, and contagion.
    pub mod interaction;
    /// Trait for entities with a position.
    ///
    /// The [`locatable::Locatable`] trait is implemented by every entity placed
    /// on the plane (Food, Creature).
    pub mod locatable;
    /// Velocity integration and wall bounces.
    pub mod movement;
    /// Unique creature names.
    pub mod names;
    /// Mutable view of every creature except the one being updated.
    pub mod neighbors;
    /// Injectable randomness.
    pub mod noise;
    /// Pending births and identity issuance.
    pub mod nursery;
    /// Simulation parameters.
    pub mod params;
    /// Priority-ordered behavioral state machine.
    pub mod state_machine;
    /// Running population statistics.
    pub mod stats;
}

//! Running counters over the whole life of an ecosystem.
//!
//! Updated from the events of each tick; the binary prints them in its
//! reports and serializes them into the run summary.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::events::SimulationEvent;

/// Running population statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Total simulated seconds.
    pub simulated_time: f32,
    /// Every creature that ever existed: seeded plus born.
    pub total_ever_lived: u64,
    /// Children conceived.
    pub births: u64,
    /// Creatures removed after dying.
    pub deaths: u64,
    /// Fights resolved.
    pub fights: u64,
    /// Food items eaten.
    pub meals: u64,
    /// Successful contagion hits.
    pub infections: u64,
    /// Largest population seen at the end of a tick.
    pub peak_population: usize,
    /// Ages at death of the most recent deaths
    pub recent_lifespans: VecDeque<f32>,
    /// Maximum number of recent deaths to track
    pub max_history: usize,
}

impl Default for PopulationStats {
    fn default() -> Self {
        Self {
            simulated_time: 0.0,
            total_ever_lived: 0,
            births: 0,
            deaths: 0,
            fights: 0,
            meals: 0,
            infections: 0,
            peak_population: 0,
            recent_lifespans: VecDeque::new(),
            max_history: 100,
        }
    }
}

impl PopulationStats {
    /// Starts counting from a seeded population.
    pub fn seeded(population: usize) -> Self {
        Self {
            total_ever_lived: population as u64,
            peak_population: population,
            ..Self::default()
        }
    }

    /// Updates counters for one event.
    pub fn record(&mut self, event: &SimulationEvent) {
        match event {
            SimulationEvent::FoodConsumed { .. } => self.meals += 1,
            SimulationEvent::Fought { .. } => self.fights += 1,
            SimulationEvent::Born { .. } => {
                self.births += 1;
                self.total_ever_lived += 1;
            }
            SimulationEvent::Infected { .. } => self.infections += 1,
            SimulationEvent::Died { age, .. } => {
                self.deaths += 1;
                self.recent_lifespans.push_back(*age);
                if self.recent_lifespans.len() > self.max_history {
                    self.recent_lifespans.pop_front();
                }
            }
        }
    }

    /// Notes the population size at the end of a tick.
    pub fn observe_population(&mut self, population: usize) {
        self.peak_population = self.peak_population.max(population);
    }

    /// Average age at death over the last N deaths
    pub fn avg_lifespan(&self) -> f32 {
        if self.recent_lifespans.is_empty() {
            0.0
        } else {
            self.recent_lifespans.iter().sum::<f32>() / self.recent_lifespans.len() as f32
        }
    }
}

//! Main ecosystem simulation.
//!
//! The ecosystem owns the population and the food and drives them tick by
//! tick. It handles:
//! - Sequential per-creature updates (metabolism, foraging, state machine,
//!   movement) with every other creature visible and writable
//! - Deferred insertion of newborns once the whole tick has run
//! - Removal of dead creatures and eaten food
//! - Periodic food spawning
//! - A fixed-timestep clock with a simulation speed multiplier

use ndarray::Array1;
use tracing::{debug, info};

use super::creature::{Creature, CreatureId, Sex, Traits};
use super::event_log::EventLog;
use super::events::{self, EventQueue, SimulationEvent};
use super::food::Food;
use super::foraging;
use super::movement;
use super::neighbors::Neighbors;
use super::noise::Noise;
use super::nursery::Nursery;
use super::params::Params;
use super::state_machine;
use super::stats::PopulationStats;

/// Advances one creature by `dt`.
///
/// Order: metabolism, foraging (when hunting, eating, or hungry), state
/// decision and its effects, movement. The creature's own record, food
/// flags, and neighbors hit by fights or contagion are mutated in place;
/// children go to `nursery`.
pub fn advance(
    creature: &mut Creature,
    neighbors: &mut Neighbors<'_>,
    food: &mut [Food],
    dt: f32,
    params: &Params,
    noise: &mut impl Noise,
    nursery: &mut Nursery,
) -> Vec<SimulationEvent> {
    let mut local_events = Vec::new();

    creature.metabolize(dt, params);

    if foraging::is_foraging(creature, params) {
        if let Some(food_index) = foraging::forage(creature, food, params) {
            local_events.push(SimulationEvent::FoodConsumed {
                creature: creature.id,
                food_index,
            });
        }
    }

    let transition = state_machine::decide(creature, neighbors, food, dt, params, noise);
    local_events.extend(state_machine::apply(
        creature, neighbors, transition, params, noise, nursery,
    ));

    movement::integrate(creature, dt, params, noise);

    local_events
}

/// The whole simulation state.
#[derive(Debug, Clone)]
pub struct Ecosystem {
    /// Living creatures.
    pub creatures: Vec<Creature>,
    /// Food items; eaten ones are removed at the end of each tick.
    pub food: Vec<Food>,
    /// Total simulation time elapsed.
    pub time: f32,
    /// Running statistics.
    pub stats: PopulationStats,
    /// Recent notable events.
    pub event_log: EventLog,
    nursery: Nursery,
    food_timer: f32,
    accumulator: f32,
    speed: f32,
}

impl Ecosystem {
    /// Creates an ecosystem with no creatures and no food.
    pub fn empty() -> Self {
        Self {
            creatures: Vec::new(),
            food: Vec::new(),
            time: 0.0,
            stats: PopulationStats::default(),
            event_log: EventLog::default(),
            nursery: Nursery::new(),
            food_timer: 0.0,
            accumulator: 0.0,
            speed: 1.0,
        }
    }

    /// Creates an ecosystem seeded with `initial_creature_count` random creatures.
    pub fn new(params: &Params, noise: &mut impl Noise) -> Self {
        let mut ecosystem = Self::empty();
        let extent = world_extent(params);

        ecosystem.creatures = (0..params.initial_creature_count)
            .map(|_| {
                let (id, name) = ecosystem.nursery.register(noise);
                Creature::new_random(id, name, &extent, params, noise)
            })
            .collect();
        ecosystem.stats = PopulationStats::seeded(ecosystem.creatures.len());

        info!(population = ecosystem.creatures.len(), "ecosystem seeded");
        ecosystem
    }

    /// Adds a creature with a freshly issued id and name.
    pub fn spawn_creature(
        &mut self,
        sex: Sex,
        pos: Array1<f32>,
        traits: Traits,
        params: &Params,
        noise: &mut impl Noise,
    ) -> CreatureId {
        let (id, name) = self.nursery.register(noise);
        let traits = traits.clamped(params);
        let creature = Creature::new(id, name, sex, pos, params.initial_size, traits, params);
        self.creatures.push(creature);
        self.stats.total_ever_lived += 1;
        self.stats.observe_population(self.creatures.len());
        id
    }

    /// Advances the simulation by one tick of length `dt`.
    ///
    /// Creatures are updated once each, in population order. One killed by
    /// an earlier update in the same tick is skipped and no longer counts as
    /// anyone's neighbor. Children conceived during the tick join at the end,
    /// after which dead creatures and eaten food are removed.
    pub fn step(&mut self, params: &Params, dt: f32, noise: &mut impl Noise) {
        let mut queue = EventQueue::new();
        let was_populated = !self.creatures.is_empty();

        self.time += dt;
        self.stats.simulated_time = self.time;
        self.spawn_food(params, dt);

        for i in 0..self.creatures.len() {
            let Some((creature, mut neighbors)) = Neighbors::split(&mut self.creatures, i) else {
                continue;
            };
            if !creature.is_alive() {
                continue;
            }
            queue.extend(advance(
                creature,
                &mut neighbors,
                &mut self.food,
                dt,
                params,
                noise,
                &mut self.nursery,
            ));
        }

        self.creatures.extend(self.nursery.discharge());

        for dead in self.creatures.iter().filter(|c| !c.is_alive()) {
            queue.push(SimulationEvent::Died {
                creature: dead.id,
                name: dead.name.clone(),
                age: dead.age,
            });
        }
        self.creatures.retain(Creature::is_alive);
        self.food.retain(|f| !f.is_consumed());

        events::apply_events(&mut self.stats, &mut self.event_log, self.time, &mut queue);
        self.stats.observe_population(self.creatures.len());

        if was_populated && self.creatures.is_empty() {
            info!(time = self.time, "population extinct");
        }
    }

    /// Feeds wall-clock frame time into the fixed-timestep clock.
    ///
    /// Runs as many whole ticks of `physics_timestep` as have accumulated,
    /// each advancing the world by `physics_timestep × speed`. Returns the
    /// number of ticks run.
    pub fn advance_frame(
        &mut self,
        params: &Params,
        frame_time: f32,
        noise: &mut impl Noise,
    ) -> u32 {
        self.accumulator += frame_time;
        let mut ticks = 0;

        while self.accumulator >= params.physics_timestep {
            self.step(params, params.physics_timestep * self.speed, noise);
            self.accumulator -= params.physics_timestep;
            ticks += 1;
        }

        ticks
    }

    fn spawn_food(&mut self, params: &Params, dt: f32) {
        self.food_timer += dt;
        if self.food_timer < params.food_spawn_interval {
            return;
        }
        self.food_timer = 0.0;

        let extent = world_extent(params);
        for _ in 0..params.food_spawn_count {
            self.food.push(Food::new_random(&extent));
        }
        let total = self.food.len();
        debug!(count = params.food_spawn_count, total, "food spawned");
    }

    /// Current simulation speed multiplier.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Sets the speed multiplier, clamped to the configured range.
    pub fn set_speed(&mut self, speed: f32, params: &Params) {
        self.speed = speed.clamp(params.min_sim_speed, params.max_sim_speed);
    }

    /// Speeds the simulation up by one step.
    pub fn speed_up(&mut self, params: &Params) {
        self.set_speed(self.speed * params.sim_speed_step, params);
    }

    /// Slows the simulation down by one step.
    pub fn slow_down(&mut self, params: &Params) {
        self.set_speed(self.speed / params.sim_speed_step, params);
    }

    /// Restores real-time speed.
    pub fn reset_speed(&mut self) {
        self.speed = 1.0;
    }

    /// Whether every creature has died.
    pub fn is_extinct(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Children conceived this tick that have not joined yet.
    pub fn pending_births(&self) -> &[Creature] {
        self.nursery.pending()
    }

    /// Looks up a creature by id.
    pub fn find(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    /// The `n` oldest creatures, oldest first.
    pub fn oldest(&self, n: usize) -> Vec<&Creature> {
        let mut ranked: Vec<&Creature> = self.creatures.iter().collect();
        ranked.sort_by(|a, b| b.age.total_cmp(&a.age));
        ranked.truncate(n);
        ranked
    }

    /// Selects the creature with `id` and deselects all others.
    ///
    /// Returns `false` when no such creature exists; everything is then
    /// deselected.
    pub fn select(&mut self, id: CreatureId) -> bool {
        let mut found = false;
        for creature in &mut self.creatures {
            let hit = creature.id == id;
            creature.set_selected(hit);
            found |= hit;
        }
        found
    }

    /// The selected creature, if any.
    pub fn selected(&self) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.is_selected())
    }
}

impl Default for Ecosystem {
    fn default() -> Self {
        Self::empty()
    }
}

fn world_extent(params: &Params) -> Array1<f32> {
    Array1::from_vec(vec![params.world_width, params.world_height])
}

#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use critters::simulation::creature::{Creature, CreatureId, CreatureState, Sex, Traits};
use critters::simulation::ecosystem::{self, Ecosystem};
use critters::simulation::food::Food;
use critters::simulation::neighbors::Neighbors;
use critters::simulation::noise::{FixedNoise, RngNoise};
use critters::simulation::nursery::Nursery;
use critters::simulation::params::Params;
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_test_params() -> Params {
    Params {
        food_spawn_count: 0,
        initial_creature_count: 30,
        ..Params::default()
    }
}

fn average_traits() -> Traits {
    Traits {
        strength: 50.0,
        speed: 1.0,
        metabolism: 1.0,
    }
}

fn at(x: f32, y: f32) -> Array1<f32> {
    Array1::from_vec(vec![x, y])
}

fn spawn(ecosystem: &mut Ecosystem, sex: Sex, x: f32, y: f32, params: &Params) -> CreatureId {
    let mut noise = FixedNoise::default();
    ecosystem.spawn_creature(sex, at(x, y), average_traits(), params, &mut noise)
}

#[test]
fn test_ecosystem_creation() {
    let params = create_test_params();
    let mut noise = RngNoise::from_rng(StdRng::seed_from_u64(7));
    let ecosystem = Ecosystem::new(&params, &mut noise);
    let seeded = params.initial_creature_count;

    assert_eq!(ecosystem.creatures.len(), seeded);
    assert_eq!(ecosystem.stats.total_ever_lived, seeded as u64);
    assert_eq!(ecosystem.time, 0.0);
    assert!(ecosystem.food.is_empty());

    let names: HashSet<&str> = ecosystem
        .creatures
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names.len(), seeded, "duplicate names");

    let strength = params.min_strength..=params.max_strength;
    let speed = params.min_speed..=params.max_speed;
    let metabolism = params.min_metabolism..=params.max_metabolism;
    for creature in &ecosystem.creatures {
        assert_eq!(creature.health, params.initial_health);
        assert_eq!(creature.energy, params.max_energy);
        assert_eq!(creature.state, CreatureState::Wandering);
        assert!(strength.contains(&creature.strength));
        assert!(speed.contains(&creature.speed));
        assert!(metabolism.contains(&creature.metabolism));
        assert!((0.0..=params.world_width).contains(&creature.pos[0]));
        assert!((0.0..=params.world_height).contains(&creature.pos[1]));
    }
}

#[test]
fn test_hungry_creature_eats_adjacent_food() {
    let params = create_test_params();
    let mut noise = FixedNoise::default();
    let mut nursery = Nursery::new();
    let (id, name) = nursery.register(&mut noise);

    let mut creatures = vec![Creature::new(
        id,
        name,
        Sex::Male,
        at(100.0, 100.0),
        params.initial_size,
        average_traits(),
        &params,
    )];
    creatures[0].energy = 20.0;
    creatures[0].vel = at(0.5, 0.0);
    let mut food = vec![Food::at(101.0, 100.0)];

    let dt = params.physics_timestep;
    let (creature, mut neighbors) = Neighbors::split(&mut creatures, 0).unwrap();
    let events = ecosystem::advance(
        creature,
        &mut neighbors,
        &mut food,
        dt,
        &params,
        &mut noise,
        &mut nursery,
    );

    assert!(food[0].is_consumed());
    assert_eq!(events.len(), 1);
    let creature = &creatures[0];
    assert_eq!(creature.state, CreatureState::Eating);
    assert!(creature.vel.iter().all(|v| *v == 0.0));
    assert!(creature.energy <= params.max_energy);
    assert!(creature.energy > 20.0);
    let grown = params.initial_size + params.food_grow_size;
    assert_eq!(creature.size, grown);
}

#[test]
fn test_eaten_food_is_removed_after_tick() {
    let params = create_test_params();
    let mut noise = FixedNoise::default();
    let mut ecosystem = Ecosystem::empty();
    let id = spawn(&mut ecosystem, Sex::Female, 200.0, 200.0, &params);
    ecosystem.creatures[0].energy = 20.0;
    ecosystem.food.push(Food::at(201.0, 200.0));
    ecosystem.food.push(Food::at(600.0, 600.0));

    ecosystem.step(&params, params.physics_timestep, &mut noise);

    assert_eq!(ecosystem.food.len(), 1);
    assert_eq!(ecosystem.food[0].pos[0], 600.0);
    assert_eq!(ecosystem.stats.meals, 1);
    let state = ecosystem.find(id).map(|c| c.state);
    assert_eq!(state, Some(CreatureState::Eating));
}

#[test]
fn test_food_is_eaten_only_once() {
    let params = create_test_params();
    let mut noise = FixedNoise::with_roll(0.99);
    let mut ecosystem = Ecosystem::empty();
    let first = spawn(&mut ecosystem, Sex::Male, 200.0, 200.0, &params);
    let second = spawn(&mut ecosystem, Sex::Male, 202.0, 200.0, &params);
    for creature in &mut ecosystem.creatures {
        creature.energy = 20.0;
    }
    ecosystem.food.push(Food::at(201.0, 200.0));

    ecosystem.step(&params, params.physics_timestep, &mut noise);

    assert_eq!(ecosystem.stats.meals, 1);
    assert!(ecosystem.food.is_empty());
    let state = ecosystem.find(first).map(|c| c.state);
    assert_eq!(state, Some(CreatureState::Eating));

    let second = ecosystem.find(second).unwrap();
    assert_eq!(second.state, CreatureState::Hunting);
    assert!(second.energy < 20.0);
}

#[test]
fn test_dead_creatures_are_removed() {
    let params = create_test_params();
    let mut noise = FixedNoise::with_roll(0.99);
    let mut ecosystem = Ecosystem::empty();
    let doomed = spawn(&mut ecosystem, Sex::Male, 100.0, 100.0, &params);
    let healthy = spawn(&mut ecosystem, Sex::Male, 700.0, 500.0, &params);

    ecosystem.creatures[0].energy = -10.0;
    ecosystem.creatures[0].health = 0.01;

    ecosystem.step(&params, params.physics_timestep, &mut noise);

    assert!(ecosystem.find(doomed).is_none());
    assert!(ecosystem.find(healthy).is_some());
    assert_eq!(ecosystem.stats.deaths, 1);
    assert!(ecosystem.creatures.iter().all(|c| c.health > 0.0));
}

#[test]
fn test_dead_creature_is_no_partner() {
    let params = create_test_params();
    let mut noise = FixedNoise::with_roll(0.99);
    let mut ecosystem = Ecosystem::empty();
    let father = spawn(&mut ecosystem, Sex::Male, 300.0, 300.0, &params);
    spawn(&mut ecosystem, Sex::Female, 305.0, 300.0, &params);
    for creature in &mut ecosystem.creatures {
        creature.age = 10.0;
        creature.energy = 90.0;
    }
    ecosystem.creatures[1].health = 0.0;

    ecosystem.step(&params, params.physics_timestep, &mut noise);

    assert_eq!(ecosystem.stats.births, 0);
    assert_eq!(ecosystem.stats.deaths, 1);
    assert_eq!(ecosystem.creatures.len(), 1);
    let state = ecosystem.find(father).map(|c| c.state);
    assert_eq!(state, Some(CreatureState::Wandering));
}

#[test]
fn test_dead_creature_takes_no_turn() {
    let params = create_test_params();
    let mut noise = FixedNoise::default();
    let mut ecosystem = Ecosystem::empty();
    spawn(&mut ecosystem, Sex::Male, 300.0, 300.0, &params);
    let neighbor = spawn(&mut ecosystem, Sex::Female, 305.0, 300.0, &params);

    // Left alive at this health it would turn sick and infect its neighbor.
    ecosystem.creatures[0].health = 0.0;

    ecosystem.step(&params, params.physics_timestep, &mut noise);

    assert_eq!(ecosystem.stats.infections, 0);
    let health = ecosystem.find(neighbor).map(|c| c.health);
    assert_eq!(health, Some(params.initial_health));
}

#[test]
fn test_extinction() {
    let params = create_test_params();
    let mut noise = FixedNoise::with_roll(0.99);
    let mut ecosystem = Ecosystem::empty();
    spawn(&mut ecosystem, Sex::Female, 100.0, 100.0, &params);
    assert!(!ecosystem.is_extinct());

    ecosystem.creatures[0].health = 0.0;
    ecosystem.step(&params, params.physics_timestep, &mut noise);

    assert!(ecosystem.is_extinct());
    ecosystem.step(&params, params.physics_timestep, &mut noise);
    assert!(ecosystem.is_extinct());
}

#[test]
fn test_energy_never_exceeds_cap() {
    let params = Params {
        initial_creature_count: 40,
        ..Params::default()
    };
    let mut noise = RngNoise::from_rng(StdRng::seed_from_u64(42));
    let mut ecosystem = Ecosystem::new(&params, &mut noise);

    for _ in 0..600 {
        ecosystem.step(&params, params.physics_timestep, &mut noise);
        for creature in &ecosystem.creatures {
            assert!(creature.energy <= params.max_energy, "{}", creature.name);
            assert!(creature.health > 0.0);
            assert!((0.0..=params.world_width).contains(&creature.pos[0]));
            assert!((0.0..=params.world_height).contains(&creature.pos[1]));
        }
    }
}

#[test]
fn test_food_spawns_periodically() {
    let params = Params {
        food_spawn_interval: 1.0,
        food_spawn_count: 5,
        ..create_test_params()
    };
    let mut noise = FixedNoise::default();
    let mut ecosystem = Ecosystem::empty();

    ecosystem.step(&params, 0.5, &mut noise);
    assert!(ecosystem.food.is_empty());

    ecosystem.step(&params, 0.5, &mut noise);
    assert_eq!(ecosystem.food.len(), 5);
    for item in &ecosystem.food {
        assert!(!item.is_consumed());
        assert!((0.0..=params.world_width).contains(&item.pos[0]));
        assert!((0.0..=params.world_height).contains(&item.pos[1]));
    }
}

#[test]
fn test_children_join_after_tick() {
    let params = create_test_params();
    let mut noise = FixedNoise::with_roll(0.99);
    let mut ecosystem = Ecosystem::empty();
    let father = spawn(&mut ecosystem, Sex::Male, 300.0, 300.0, &params);
    let mother = spawn(&mut ecosystem, Sex::Female, 310.0, 300.0, &params);
    for creature in &mut ecosystem.creatures {
        creature.age = 10.0;
        creature.energy = 90.0;
    }

    ecosystem.step(&params, params.physics_timestep, &mut noise);

    // Both parents initiate once, each conceiving a child.
    assert_eq!(ecosystem.creatures.len(), 4);
    assert!(ecosystem.pending_births().is_empty());
    assert_eq!(ecosystem.stats.births, 2);
    assert_eq!(ecosystem.stats.total_ever_lived, 4);

    let children: Vec<_> = ecosystem
        .creatures
        .iter()
        .filter(|c| c.age == 0.0)
        .collect();
    assert_eq!(children.len(), 2);
    for child in children {
        assert_eq!(child.energy, params.max_energy);
        assert_eq!(child.pos[0], 305.0);
        assert_ne!(child.id, father);
        assert_ne!(child.id, mother);
    }

    let father = ecosystem.find(father).unwrap();
    assert_eq!(father.state, CreatureState::Mating);
    assert!(father.energy < 90.0 * params.reproduction_energy_factor);
}

#[test]
fn test_lone_fertile_creature_has_no_children() {
    let params = create_test_params();
    let mut noise = FixedNoise::default();
    let mut ecosystem = Ecosystem::empty();
    spawn(&mut ecosystem, Sex::Female, 300.0, 300.0, &params);
    ecosystem.creatures[0].age = 10.0;
    ecosystem.creatures[0].energy = 90.0;

    for _ in 0..10 {
        ecosystem.step(&params, params.physics_timestep, &mut noise);
    }

    assert_eq!(ecosystem.creatures.len(), 1);
    assert_eq!(ecosystem.stats.births, 0);
    let state = ecosystem.creatures[0].state;
    assert_eq!(state, CreatureState::Wandering);
}

#[test]
fn test_speed_is_clamped() {
    let params = create_test_params();
    let mut ecosystem = Ecosystem::empty();

    ecosystem.set_speed(1000.0, &params);
    assert_eq!(ecosystem.speed(), params.max_sim_speed);

    for _ in 0..200 {
        ecosystem.slow_down(&params);
    }
    assert_eq!(ecosystem.speed(), params.min_sim_speed);

    ecosystem.reset_speed();
    ecosystem.speed_up(&params);
    assert!((ecosystem.speed() - params.sim_speed_step).abs() < 1e-6);
}

#[test]
fn test_advance_frame_runs_fixed_ticks() {
    let params = create_test_params();
    let tick = params.physics_timestep;
    let mut noise = FixedNoise::default();
    let mut ecosystem = Ecosystem::empty();
    ecosystem.set_speed(2.0, &params);

    let ticks = ecosystem.advance_frame(&params, tick * 3.5, &mut noise);
    assert_eq!(ticks, 3);
    assert!((ecosystem.time - 6.0 * tick).abs() < 1e-5);

    // The leftover half tick carries over.
    let ticks = ecosystem.advance_frame(&params, tick * 0.6, &mut noise);
    assert_eq!(ticks, 1);

    let ticks = ecosystem.advance_frame(&params, tick * 0.2, &mut noise);
    assert_eq!(ticks, 0);
}

#[test]
fn test_oldest_and_selection() {
    let params = create_test_params();
    let mut ecosystem = Ecosystem::empty();
    let mut ids = Vec::new();
    for (i, age) in [3.0, 9.0, 1.0, 6.0].into_iter().enumerate() {
        let x = 100.0 + 100.0 * i as f32;
        ids.push(spawn(&mut ecosystem, Sex::Male, x, 100.0, &params));
        ecosystem.creatures[i].age = age;
    }

    let oldest: Vec<CreatureId> = ecosystem.oldest(2).iter().map(|c| c.id).collect();
    assert_eq!(oldest, vec![ids[1], ids[3]]);
    assert_eq!(ecosystem.oldest(10).len(), 4);

    assert!(ecosystem.select(ids[2]));
    assert_eq!(ecosystem.selected().map(|c| c.id), Some(ids[2]));
    assert!(ecosystem.select(ids[0]));
    let selected = ecosystem.creatures.iter().filter(|c| c.is_selected());
    assert_eq!(selected.count(), 1);

    assert!(!ecosystem.select(CreatureId(999)));
    assert!(ecosystem.selected().is_none());
}

//! Velocity integration, wall bounces, and facing.

use super::creature::{Creature, CreatureState};
use super::geometric_utils;
use super::noise::Noise;
use super::params::Params;

/// Moves `creature` by one tick.
///
/// Stationary states zero the velocity. Anything but hunting gets uniform
/// jitter of `±wander_jitter` per axis. Velocity is capped at
/// `max_velocity`, but the displacement is also scaled by the speed measured
/// *before* the cap, so fast creatures cover disproportionately more ground.
/// Walls clamp the position and reflect the crossing component by
/// `boundary_bounce`. The right and bottom walls sit one body size inside
/// the world edge.
pub fn integrate(creature: &mut Creature, dt: f32, params: &Params, noise: &mut impl Noise) {
    if creature.state.is_stationary() {
        creature.vel.fill(0.0);
        return;
    }

    if creature.state != CreatureState::Hunting {
        creature.vel[0] += noise.spread(params.wander_jitter);
        creature.vel[1] += noise.spread(params.wander_jitter);
    }

    let speed = geometric_utils::magnitude(&creature.vel);
    if speed > params.max_velocity {
        creature.vel *= params.max_velocity / speed;
    }

    let step = dt * params.base_movement_speed * speed;
    creature.pos.scaled_add(step, &creature.vel);

    if speed > params.rotation_threshold {
        creature.rot = geometric_utils::heading(&creature.vel);
    }

    bounce(creature, params);
}

fn bounce(creature: &mut Creature, params: &Params) {
    let limits = [
        params.world_width - creature.size,
        params.world_height - creature.size,
    ];

    for (axis, limit) in limits.into_iter().enumerate() {
        if creature.pos[axis] < 0.0 {
            creature.pos[axis] = 0.0;
            creature.vel[axis] *= params.boundary_bounce;
        } else if creature.pos[axis] > limit {
            creature.pos[axis] = limit;
            creature.vel[axis] *= params.boundary_bounce;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::creature::{CreatureId, Sex, Traits};
    use crate::simulation::noise::FixedNoise;
    use ndarray::Array1;

    fn mover(params: &Params) -> Creature {
        Creature::new(
            CreatureId(0),
            "Atlas Wind".into(),
            Sex::Male,
            Array1::from_vec(vec![100.0, 100.0]),
            params.initial_size,
            Traits {
                strength: 50.0,
                speed: 1.0,
                metabolism: 1.0,
            },
            params,
        )
    }

    #[test]
    fn stationary_states_do_not_move() {
        let params = Params::default();
        for state in [
            CreatureState::Eating,
            CreatureState::Fighting,
            CreatureState::Mating,
        ] {
            let mut c = mover(&params);
            c.state = state;
            c.vel = Array1::from_vec(vec![1.0, 1.0]);
            integrate(&mut c, 0.1, &params, &mut FixedNoise::default());
            assert!(c.vel.iter().all(|v| *v == 0.0));
            assert!((c.pos[0] - 100.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn displacement_uses_uncapped_speed() {
        let params = Params::default();
        let mut c = mover(&params);
        c.vel = Array1::from_vec(vec![4.0, 0.0]);
        let dt = 0.01;
        integrate(&mut c, dt, &params, &mut FixedNoise::default());
        assert!((c.vel[0] - params.max_velocity).abs() < 1e-5);
        let expected = 100.0 + params.max_velocity * dt * params.base_movement_speed * 4.0;
        assert!((c.pos[0] - expected).abs() < 1e-3);
    }

    #[test]
    fn facing_follows_movement() {
        let params = Params::default();
        let mut c = mover(&params);
        c.vel = Array1::from_vec(vec![0.0, 1.0]);
        integrate(&mut c, 0.01, &params, &mut FixedNoise::default());
        assert!((c.rot - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn slow_creature_keeps_facing() {
        let params = Params::default();
        let mut c = mover(&params);
        c.rot = 1.0;
        c.vel = Array1::from_vec(vec![-0.05, 0.0]);
        integrate(&mut c, 0.01, &params, &mut FixedNoise::default());
        assert!((c.rot - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bounces_off_far_wall() {
        let params = Params::default();
        let mut c = mover(&params);
        c.pos = Array1::from_vec(vec![100.0, params.world_height - c.size]);
        c.vel = Array1::from_vec(vec![0.0, 1.5]);
        integrate(&mut c, 0.1, &params, &mut FixedNoise::default());
        assert!((c.pos[1] - (params.world_height - c.size)).abs() < 1e-4);
        assert!((c.vel[1] - 1.5 * params.boundary_bounce).abs() < 1e-5);
    }
}

//! Nearest-food search and consumption.

use super::creature::{Creature, CreatureState};
use super::food::Food;
use super::geometric_utils;
use super::locatable::Locatable;
use super::params::Params;

/// Whether a creature looks for food this tick.
///
/// Hunting and eating creatures forage; so does a creature that has just
/// crossed the hunger threshold and will be hunting after this tick's
/// decision.
pub fn is_foraging(creature: &Creature, params: &Params) -> bool {
    matches!(
        creature.state,
        CreatureState::Hunting | CreatureState::Eating
    ) || creature.energy < params.hungry_threshold
}

/// Scans all food, eating the first item within reach.
///
/// Tracks the nearest uneaten item while scanning. Scanning stops at the
/// first item close enough to eat, which is consumed immediately. A hunting
/// creature that ate nothing is steered towards the nearest item.
///
/// Returns the index of the eaten item.
pub fn forage(creature: &mut Creature, food: &mut [Food], params: &Params) -> Option<usize> {
    let reach = (creature.size + params.food_size) * 0.5;
    let mut nearest: Option<(usize, f32)> = None;
    let mut meal = None;

    for (i, item) in food.iter_mut().enumerate() {
        if item.is_consumed() {
            continue;
        }

        let distance = creature.distance_to(&*item);
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((i, distance));
        }

        if distance < reach {
            item.consume();
            creature.feed(params);
            meal = Some(i);
            break;
        }
    }

    if creature.state == CreatureState::Hunting {
        if let Some((i, _)) = nearest {
            if let Some(heading) = geometric_utils::direction(&creature.pos, &food[i].pos) {
                creature.vel += &(heading * params.food_seek_force);
            }
        }
    }

    meal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::creature::{CreatureId, Sex, Traits};
    use ndarray::Array1;

    fn hungry_at(x: f32, y: f32, params: &Params) -> Creature {
        let traits = Traits {
            strength: 60.0,
            speed: 1.0,
            metabolism: 1.0,
        };
        let mut c = Creature::new(
            CreatureId(0),
            "Lyra Rain".into(),
            Sex::Male,
            Array1::from_vec(vec![x, y]),
            params.initial_size,
            traits,
            params,
        );
        c.energy = 20.0;
        c.state = CreatureState::Hunting;
        c
    }

    #[test]
    fn eats_reachable_food() {
        let params = Params::default();
        let mut c = hungry_at(100.0, 100.0, &params);
        let mut food = vec![Food::at(101.0, 100.0)];
        assert_eq!(forage(&mut c, &mut food, &params), Some(0));
        assert!(food[0].is_consumed());
        assert_eq!(c.state, CreatureState::Eating);
    }

    #[test]
    fn consumed_food_is_ignored() {
        let params = Params::default();
        let mut c = hungry_at(100.0, 100.0, &params);
        let mut food = vec![Food::at(101.0, 100.0)];
        food[0].consume();
        assert_eq!(forage(&mut c, &mut food, &params), None);
        assert!((c.energy - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn steers_towards_nearest() {
        let params = Params::default();
        let mut c = hungry_at(100.0, 100.0, &params);
        let mut food = vec![Food::at(400.0, 100.0), Food::at(100.0, 150.0)];
        assert_eq!(forage(&mut c, &mut food, &params), None);
        assert!(c.vel[0].abs() < 1e-6);
        assert!((c.vel[1] - params.food_seek_force).abs() < 1e-6);
    }

    #[test]
    fn stops_at_first_reachable_item() {
        let params = Params::default();
        let mut c = hungry_at(100.0, 100.0, &params);
        let mut food = vec![Food::at(103.0, 100.0), Food::at(100.5, 100.0)];
        assert_eq!(forage(&mut c, &mut food, &params), Some(0));
        assert!(!food[1].is_consumed());
    }
}

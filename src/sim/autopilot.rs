//! Demo pilot
//!
//! Produces the same intents a player would: turn toward the nearest
//! unvisited planet, thrust once roughly aligned, leave a planet after
//! docking. Used for attract mode and headless runs.

use super::state::World;
use super::tick::TickInput;
use crate::{heading_toward, normalize_angle};

/// Only thrust when the nose is within this many radians of the target
const THRUST_CONE: f64 = 0.3;

/// Intents for the next tick
pub fn steer(world: &World) -> TickInput {
    let mut input = TickInput::default();
    let craft = &world.craft;

    if world.docked_at.is_some() {
        input.depart = !world.all_discovered();
        return input;
    }

    let Some(target) = world
        .celestials
        .iter()
        .filter(|c| !c.visited)
        .map(|c| c.body.pos)
        .min_by(|a, b| a.distance(craft.body.pos).total_cmp(&b.distance(craft.body.pos)))
    else {
        return input;
    };

    let error = normalize_angle(heading_toward(craft.body.pos, target) - craft.heading);
    if error.abs() > world.settings.rotation_per_tick / 2.0 {
        // Positive heading change turns clockwise
        input.turn_right = error > 0.0;
        input.turn_left = error < 0.0;
    }
    input.thrust = error.abs() < THRUST_CONE;
    input
}

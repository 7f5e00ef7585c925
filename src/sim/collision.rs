//! Collision passes run after every body has moved
//!
//! Only the craft interacts with planets: touching one docks the craft and
//! counts the planet as discovered the first time.

use super::state::{World, WorldEvent};

/// Dock the craft onto every eligible celestial it overlaps. The last one in
/// catalog order wins the dock reference.
pub fn resolve_craft_collisions(world: &mut World, events: &mut Vec<WorldEvent>) {
    let total = world.celestials.len();
    for index in 0..total {
        let celestial = &mut world.celestials[index];
        if !world.craft.body.collides(&celestial.body) {
            continue;
        }

        world.craft.body.pos = celestial.body.pos;
        world.craft.body.vel = celestial.body.vel;

        if world.docked_at != Some(index) {
            log::debug!("Docked at {}", celestial.name);
            events.push(WorldEvent::Docked { index });
        }
        world.docked_at = Some(index);

        if !celestial.visited {
            celestial.visited = true;
            world.discovered += 1;
            log::info!(
                "Discovered {} ({}/{})",
                celestial.name,
                world.discovered,
                total
            );
            events.push(WorldEvent::Discovered { index });
        }
    }
}

/// Report overlapping celestial pairs. No rule resolves them yet, so state is
/// left unchanged.
pub fn detect_celestial_contacts(world: &World, events: &mut Vec<WorldEvent>) {
    let celestials = &world.celestials;
    for a in 0..celestials.len() {
        for b in a + 1..celestials.len() {
            if celestials[a].body.collides(&celestials[b].body) {
                events.push(WorldEvent::CelestialContact { a, b });
            }
        }
    }
}

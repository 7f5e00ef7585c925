//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one physics step. Velocities are in
//! pixels per tick, so there is no `dt`.

use serde::{Deserialize, Serialize};

use super::collision::{detect_celestial_contacts, resolve_craft_collisions};
use super::state::{World, WorldEvent};
use crate::input::Intent;

/// Player intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Leave the planet the craft is docked at
    pub depart: bool,
}

impl TickInput {
    pub fn set(&mut self, intent: Intent, active: bool) {
        match intent {
            Intent::Thrust => self.thrust = active,
            Intent::TurnLeft => self.turn_left = active,
            Intent::TurnRight => self.turn_right = active,
            Intent::Depart => self.depart = active,
        }
    }

    pub fn get(&self, intent: Intent) -> bool {
        match intent {
            Intent::Thrust => self.thrust,
            Intent::TurnLeft => self.turn_left,
            Intent::TurnRight => self.turn_right,
            Intent::Depart => self.depart,
        }
    }
}

/// Advance the world by one physics step and return what happened.
///
/// Order: latch input, undock, move the craft, move the celestials, collide.
pub fn tick(world: &mut World, input: &TickInput) -> Vec<WorldEvent> {
    let mut events = Vec::new();
    if world.is_over() {
        return events;
    }

    world.craft.controls = *input;

    if input.depart {
        depart(world, &mut events);
    }

    world.craft.advance(&world.settings);
    let space_size = world.settings.space_size;
    for celestial in &mut world.celestials {
        celestial.body.advance(space_size);
    }

    resolve_craft_collisions(world, &mut events);
    if world.settings.celestial_collisions {
        detect_celestial_contacts(world, &mut events);
    }

    world.ticks += 1;
    events
}

/// Push the craft off the planet it is docked at. No-op when not docked.
fn depart(world: &mut World, events: &mut Vec<WorldEvent>) {
    let Some(index) = world.docked_at.take() else {
        return;
    };
    let offset = world.settings.departure_offset;
    let craft = &mut world.craft.body;
    // Up the screen, unless the top wall is too close to clear the planet
    if craft.pos.y >= offset {
        craft.pos.y -= offset;
    } else {
        craft.pos.y += offset;
    }
    craft.clamp_to_space(world.settings.space_size);
    if let Some(celestial) = world.celestials.get(index) {
        log::debug!("Departed from {}", celestial.name);
    }
    events.push(WorldEvent::Departed { index });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CelestialDef};
    use crate::settings::Settings;
    use crate::sim::Craft;
    use glam::DVec2;
    use proptest::prelude::*;

    fn one_planet_world() -> World {
        let catalog = Catalog::new(vec![CelestialDef::new("Target", "test planet")]);
        let mut world = World::generate(Settings::default(), &catalog, 1).unwrap();
        world.celestials[0].body.pos = DVec2::new(600.0, 600.0);
        world.celestials[0].body.immunity_ticks = 0;
        world.craft.body.immunity_ticks = 0;
        world
    }

    fn thrust() -> TickInput {
        TickInput {
            thrust: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_counts_and_latches_input() {
        let mut world = one_planet_world();
        let input = TickInput {
            turn_left: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        tick(&mut world, &input);
        assert_eq!(world.ticks(), 2);
        assert_eq!(world.craft.controls, input);
    }

    #[test]
    fn test_thrust_from_rest_moves_up() {
        let mut world = one_planet_world();
        tick(&mut world, &thrust());
        let vel = world.craft.body.vel;
        assert!(vel.x.abs() < 1e-12);
        assert!((vel.y - (-0.4 * 0.99)).abs() < 1e-12);
        // Position integrates at the start of the next tick
        assert_eq!(world.craft.body.pos, DVec2::splat(1000.0));
        tick(&mut world, &TickInput::default());
        assert!(world.craft.body.pos.y < 1000.0);
    }

    #[test]
    fn test_turning_left_and_right_cancel() {
        let mut world = one_planet_world();
        let input = TickInput {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        assert_eq!(world.craft.heading, 0.0);

        let right = TickInput {
            turn_right: true,
            ..Default::default()
        };
        tick(&mut world, &right);
        assert!((world.craft.heading - 0.04 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_damping_applied_once_regardless_of_flags() {
        let settings = Settings::default();
        for flags in [
            TickInput::default(),
            TickInput {
                turn_left: true,
                ..Default::default()
            },
            TickInput {
                turn_left: true,
                turn_right: true,
                ..Default::default()
            },
            TickInput {
                turn_left: true,
                turn_right: true,
                depart: true,
                ..Default::default()
            },
        ] {
            let mut craft = Craft::new(&settings);
            craft.body.vel = DVec2::new(5.0, -2.0);
            craft.controls = flags;
            craft.advance(&settings);
            assert_eq!(craft.body.vel, DVec2::new(5.0, -2.0) * 0.99);
        }

        // With thrust the impulse is damped too, exactly once
        let mut craft = Craft::new(&settings);
        craft.body.vel = DVec2::new(5.0, -2.0);
        craft.controls = TickInput {
            thrust: true,
            turn_left: true,
            turn_right: true,
            depart: false,
        };
        craft.advance(&settings);
        let expected = (DVec2::new(5.0, -2.0) + DVec2::new(0.0, -0.4)) * 0.99;
        assert!((craft.body.vel - expected).length() < 1e-12);
    }

    #[test]
    fn test_thrust_suppressed_at_max_speed() {
        let settings = Settings::default();
        let mut craft = Craft::new(&settings);
        craft.body.vel = DVec2::new(10.0, 0.0);
        craft.controls = TickInput {
            thrust: true,
            ..Default::default()
        };
        craft.advance(&settings);
        assert_eq!(craft.body.vel, DVec2::new(10.0, 0.0) * 0.99);
    }

    #[test]
    fn test_depart_while_docked() {
        let mut world = one_planet_world();
        world.craft.body.pos = DVec2::new(600.0, 600.0);
        tick(&mut world, &TickInput::default());
        assert_eq!(world.docked_at, Some(0));

        let input = TickInput {
            depart: true,
            ..Default::default()
        };
        let events = tick(&mut world, &input);
        assert!(world.docked_at.is_none());
        assert!(events.contains(&WorldEvent::Departed { index: 0 }));

        let planet = &world.celestials[0].body;
        let dist = world.craft.body.pos.distance(planet.pos);
        assert!(dist > planet.radius);
        assert!(dist >= planet.radius + world.craft.body.radius);
        assert_eq!(world.discovered(), 1);
    }

    #[test]
    fn test_depart_near_top_wall_goes_down() {
        let mut world = one_planet_world();
        world.celestials[0].body.pos = DVec2::new(500.0, 30.0);
        world.craft.body.pos = DVec2::new(500.0, 30.0);
        tick(&mut world, &TickInput::default());
        assert_eq!(world.docked_at, Some(0));

        let depart = TickInput {
            depart: true,
            ..Default::default()
        };
        tick(&mut world, &depart);
        assert!(world.docked_at.is_none());
        let planet = &world.celestials[0].body;
        let dist = world.craft.body.pos.distance(planet.pos);
        assert!(dist >= planet.radius + world.craft.body.radius);
        assert!(world.craft.body.pos.y > planet.pos.y);
    }

    #[test]
    fn test_depart_when_not_docked_is_noop() {
        let mut world = one_planet_world();
        let input = TickInput {
            depart: true,
            ..Default::default()
        };
        let events = tick(&mut world, &input);
        assert!(events.is_empty());
        assert_eq!(world.craft.body.pos, DVec2::splat(1000.0));
        assert!(world.docked_at.is_none());
    }

    #[test]
    fn test_returning_to_visited_planet_redocks_without_counting() {
        let mut world = one_planet_world();
        world.craft.body.pos = DVec2::new(600.0, 600.0);
        tick(&mut world, &TickInput::default());
        tick(
            &mut world,
            &TickInput {
                depart: true,
                ..Default::default()
            },
        );
        assert!(world.docked_at.is_none());

        // Drift back onto the planet
        world.craft.body.pos = DVec2::new(610.0, 600.0);
        let events = tick(&mut world, &TickInput::default());
        assert_eq!(world.docked_at, Some(0));
        assert_eq!(events, vec![WorldEvent::Docked { index: 0 }]);
        assert_eq!(world.discovered(), 1);
    }

    #[test]
    fn test_docked_craft_follows_planet() {
        let mut world = one_planet_world();
        world.craft.body.pos = DVec2::new(600.0, 600.0);
        world.celestials[0].body.vel = DVec2::new(1.0, 0.5);
        tick(&mut world, &TickInput::default());
        for _ in 0..5 {
            tick(&mut world, &TickInput::default());
            assert_eq!(world.craft.body.pos, world.celestials[0].body.pos);
            assert_eq!(world.craft.body.vel, world.celestials[0].body.vel);
        }
    }

    #[test]
    fn test_celestial_contacts_only_when_enabled() {
        let catalog = Catalog::new(vec![CelestialDef::new("A", "a"), CelestialDef::new("B", "b")]);
        let mut world = World::generate(Settings::default(), &catalog, 2).unwrap();
        for c in &mut world.celestials {
            c.body.immunity_ticks = 0;
            c.body.pos = DVec2::new(300.0, 300.0);
        }
        let contact = WorldEvent::CelestialContact { a: 0, b: 1 };

        assert!(!tick(&mut world, &TickInput::default()).contains(&contact));
        world.settings.celestial_collisions = true;
        assert!(tick(&mut world, &TickInput::default()).contains(&contact));
    }

    #[test]
    fn test_nothing_destroys_the_craft_yet() {
        // No hazard sets `destroyed`; only an external hook ends the game
        let mut world = one_planet_world();
        world.craft.body.pos = DVec2::new(600.0, 600.0);
        for _ in 0..100 {
            tick(&mut world, &thrust());
        }
        assert!(!world.is_over());

        world.craft.body.destroy();
        assert!(world.is_over());
        let ticks = world.ticks();
        assert!(tick(&mut world, &thrust()).is_empty());
        assert_eq!(world.ticks(), ticks);
    }

    #[test]
    fn test_determinism() {
        let catalog = Catalog::new(vec![CelestialDef::new("A", "a"), CelestialDef::new("B", "b")]);
        let mut w1 = World::generate(Settings::default(), &catalog, 99999).unwrap();
        let mut w2 = World::generate(Settings::default(), &catalog, 99999).unwrap();
        let inputs = [
            thrust(),
            TickInput {
                turn_right: true,
                thrust: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                turn_left: true,
                ..Default::default()
            },
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut w1, input);
                tick(&mut w2, input);
            }
        }
        assert_eq!(w1.craft, w2.craft);
        assert_eq!(w1.ticks(), w2.ticks());
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_cap(
            heading in -10.0f64..10.0,
            vx in -10.0f64..10.0,
            vy in -10.0f64..10.0,
            turns in proptest::collection::vec(any::<(bool, bool)>(), 1..200),
        ) {
            let settings = Settings::default();
            let mut craft = Craft::new(&settings);
            craft.heading = heading;
            craft.body.vel = DVec2::new(vx, vy).clamp_length_max(settings.max_speed);
            for (left, right) in turns {
                craft.controls = TickInput {
                    thrust: true,
                    turn_left: left,
                    turn_right: right,
                    depart: false,
                };
                craft.advance(&settings);
                prop_assert!(craft.body.speed() <= settings.max_speed + 1e-9);
            }
        }

        #[test]
        fn prop_world_bodies_stay_in_space(
            seed in any::<u64>(),
            steps in proptest::collection::vec(any::<(bool, bool, bool, bool)>(), 1..300),
        ) {
            let catalog =
                Catalog::new(vec![CelestialDef::new("A", "a"), CelestialDef::new("B", "b")]);
            let mut world = World::generate(Settings::default(), &catalog, seed).unwrap();
            for (thrust, turn_left, turn_right, depart) in steps {
                let input = TickInput {
                    thrust,
                    turn_left,
                    turn_right,
                    depart,
                };
                tick(&mut world, &input);
                let pos = world.craft.body.pos;
                prop_assert!((0.0..=2000.0).contains(&pos.x));
                prop_assert!((0.0..=2000.0).contains(&pos.y));
                let visited = world.celestials.iter().filter(|c| c.visited).count();
                prop_assert_eq!(world.discovered() as usize, visited);
            }
        }
    }
}

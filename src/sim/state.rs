//! World state and core simulation types
//!
//! The world is rebuilt from scratch for every new game; nothing here is
//! persisted.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::layout::{place_celestials, scatter_stars};
use super::tick::TickInput;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::heading_vector;
use crate::settings::Settings;

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Craft {
    pub body: Body,
    /// Radians; 0 points up the screen, positive turns clockwise. Never wrapped.
    pub heading: f64,
    /// Intents applied on the most recent tick
    pub controls: TickInput,
    /// Hull color (0xRRGGBB), cosmetic only
    pub color: u32,
}

impl Craft {
    pub fn new(settings: &Settings) -> Self {
        Self {
            body: Body::new(
                settings.center(),
                DVec2::ZERO,
                settings.craft_radius,
                settings.craft_immunity_ticks,
            ),
            heading: 0.0,
            controls: TickInput::default(),
            color: settings.craft_color,
        }
    }

    /// Back to the spawn point for a new game. Color is kept.
    pub fn reset(&mut self, settings: &Settings) {
        let color = self.color;
        *self = Self::new(settings);
        self.color = color;
    }

    /// Body step, then turning, thrust and damping in that order
    pub fn advance(&mut self, settings: &Settings) {
        self.body.advance(settings.space_size);

        if self.controls.turn_left {
            self.heading -= settings.rotation_per_tick;
        }
        if self.controls.turn_right {
            self.heading += settings.rotation_per_tick;
        }

        if self.controls.thrust && self.body.speed() < settings.max_speed {
            self.body.vel += heading_vector(self.heading) * settings.acceleration;
            self.body.vel = self.body.vel.clamp_length_max(settings.max_speed);
        }

        self.body.vel *= settings.damping;
    }

    /// Whether the engine is firing (for the exhaust sprite)
    pub fn is_thrusting(&self) -> bool {
        self.controls.thrust
    }
}

/// A planet that can be visited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Celestial {
    pub body: Body,
    pub name: String,
    pub description: String,
    /// Set on first docking, never cleared
    pub visited: bool,
    /// Opaque image key for the presentation layer
    pub image: String,
}

impl Celestial {
    pub fn new(
        pos: DVec2,
        name: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        settings: &Settings,
    ) -> Self {
        Self {
            body: Body::new(
                pos,
                DVec2::ZERO,
                settings.celestial_radius,
                settings.celestial_immunity_ticks,
            ),
            name: name.into(),
            description: description.into(),
            visited: false,
            image: image.into(),
        }
    }
}

/// Decorative background star (no physics)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: DVec2,
    /// Sprite rotation in degrees
    pub angle: f64,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Craft latched onto celestial `index`
    Docked { index: usize },
    /// First visit to celestial `index`
    Discovered { index: usize },
    /// Craft left celestial `index`
    Departed { index: usize },
    /// Two celestials overlap (only with `celestial_collisions` enabled)
    CelestialContact { a: usize, b: usize },
}

/// Complete game world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Seed the layout was generated from
    pub seed: u64,
    pub settings: Settings,
    pub craft: Craft,
    /// In catalog order
    pub celestials: Vec<Celestial>,
    pub stars: Vec<Star>,
    pub running: bool,
    /// Index into `celestials` of the planet the craft is sitting on
    pub docked_at: Option<usize>,
    /// Number of visited celestials
    pub discovered: u32,
    /// Physics ticks since the world was generated
    pub ticks: u64,
}

impl World {
    /// Build a fresh world. Fails without side effects if the settings are
    /// invalid or the planets cannot be laid out.
    pub fn generate(settings: Settings, catalog: &Catalog, seed: u64) -> Result<Self> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let stars = scatter_stars(&settings, &mut rng);
        let celestials = place_celestials(&settings, catalog, &mut rng)?;
        let craft = Craft::new(&settings);

        log::info!(
            "Generated world (seed {seed}): {} celestials, {} stars",
            celestials.len(),
            stars.len()
        );

        Ok(Self {
            seed,
            settings,
            craft,
            celestials,
            stars,
            running: false,
            docked_at: None,
            discovered: 0,
            ticks: 0,
        })
    }

    /// Regenerate everything for a new game. On error the current world is
    /// left untouched.
    pub fn reset(&mut self, catalog: &Catalog, seed: u64) -> Result<()> {
        let mut fresh = Self::generate(self.settings.clone(), catalog, seed)?;
        fresh.craft.color = self.craft.color;
        *self = fresh;
        Ok(())
    }

    pub fn craft(&self) -> &Craft {
        &self.craft
    }

    pub fn celestials(&self) -> &[Celestial] {
        &self.celestials
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn discovered(&self) -> u32 {
        self.discovered
    }

    pub fn total(&self) -> usize {
        self.celestials.len()
    }

    /// The celestial the craft is docked at, if any
    pub fn docked(&self) -> Option<&Celestial> {
        self.docked_at.and_then(|i| self.celestials.get(i))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The game ends when the craft is destroyed. No current rule destroys
    /// it; hazards would set `craft.body.destroyed`.
    pub fn is_over(&self) -> bool {
        self.craft.body.destroyed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// All celestials have been visited
    pub fn all_discovered(&self) -> bool {
        self.discovered as usize == self.celestials.len()
    }

    /// Set the hull color
    pub fn set_craft_color(&mut self, color: u32) {
        self.craft.color = color;
    }
}

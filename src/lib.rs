//! Astro Voyage - explore a bounded patch of space and visit every planet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, docking, world state)
//! - `runner`: Fixed-rate scheduler and the threaded game loop
//! - `catalog`: Celestial definitions loaded at world creation
//! - `input`: Key bindings and press/release handling
//! - `settings`: Data-driven game tuning

pub mod catalog;
pub mod error;
pub mod input;
pub mod runner;
pub mod settings;
pub mod sim;

pub use catalog::{Catalog, CelestialDef};
pub use error::{CatalogError, ConfigError, Error, LayoutError, Result};
pub use input::{Intent, KeyBindings};
pub use runner::{FixedStepScheduler, Simulation, WorldObserver};
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Side length of the square play space, in pixels
    pub const SPACE_SIZE: f64 = 2000.0;

    /// Physics ticks per second. Velocities are expressed in pixels per tick.
    pub const PHYSICS_HZ: f64 = 30.0;
    /// Display notifications per second
    pub const DISPLAY_HZ: f64 = 144.0;
    /// How long `stop` waits for the loop thread before abandoning it
    pub const STOP_TIMEOUT_MS: u64 = 100;
    /// Sleep between scheduler polls
    pub const IDLE_SLEEP_MS: u64 = 1;

    /// Craft defaults
    pub const CRAFT_RADIUS: f64 = 15.0;
    pub const CRAFT_IMMUNITY_TICKS: u32 = 10;
    /// Thrust is suppressed at or above this speed (pixels/tick)
    pub const MAX_SPEED: f64 = 10.0;
    /// Velocity multiplier applied every tick
    pub const DAMPING: f64 = 0.99;
    /// Thrust added per tick along the heading
    pub const ACCELERATION: f64 = 0.4;
    pub const ROTATION_PER_TICK: f64 = 0.04 * std::f64::consts::PI;
    pub const CRAFT_COLOR: u32 = 0x000000;

    /// Celestial defaults
    pub const CELESTIAL_RADIUS: f64 = 60.0;
    pub const CELESTIAL_IMMUNITY_TICKS: u32 = 30;

    /// Placement: lower bounds per axis, and the margin kept from the far edge
    pub const PLACEMENT_MIN_X: f64 = 70.0;
    pub const PLACEMENT_MIN_Y: f64 = 100.0;
    pub const PLACEMENT_MAX_MARGIN: f64 = 80.0;
    /// Two celestials are stacked when closer than this on both axes
    pub const PLACEMENT_SEPARATION: f64 = 160.0;
    pub const PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Starfield: one star per this many pixels of side length
    pub const STAR_DENSITY: f64 = 50.0;
    pub const STAR_MARGIN: f64 = 20.0;
    pub const STAR_MAX_ANGLE: f64 = 90.0;

    /// Distance the craft is pushed (up the screen) when leaving a planet
    pub const DEPARTURE_OFFSET: f64 = 80.0;
}

/// Normalize an angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    angle = angle.rem_euclid(TAU);
    if angle >= PI {
        angle -= TAU;
    }
    angle
}

/// Unit direction of a heading. Heading 0 points up the screen (-y), and
/// positive headings turn clockwise.
#[inline]
pub fn heading_vector(heading: f64) -> DVec2 {
    DVec2::new(heading.sin(), -heading.cos())
}

/// Heading that points from `from` toward `to`, in the convention of
/// [`heading_vector`]
#[inline]
pub fn heading_toward(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.x.atan2(-d.y)
}

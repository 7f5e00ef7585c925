//! Game tuning and loop settings
//!
//! Every field defaults to the matching constant in [`crate::consts`]. A
//! settings file only needs the keys it wants to override.

use std::path::Path;
use std::time::Duration;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tuning for the simulation and its loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Space ===
    /// Side length of the square play space
    pub space_size: f64,

    // === Craft ===
    pub craft_radius: f64,
    pub craft_immunity_ticks: u32,
    pub max_speed: f64,
    pub acceleration: f64,
    pub rotation_per_tick: f64,
    /// Velocity multiplier applied once per tick, in (0, 1)
    pub damping: f64,
    /// Cosmetic hull color (0xRRGGBB)
    pub craft_color: u32,

    // === Celestials ===
    pub celestial_radius: f64,
    pub celestial_immunity_ticks: u32,
    /// Report overlapping celestial pairs each tick
    pub celestial_collisions: bool,

    // === Placement ===
    pub placement_min: DVec2,
    pub placement_max_margin: f64,
    pub placement_separation: f64,
    /// Rejection-sampling attempts per celestial before giving up
    pub placement_attempts: u32,

    // === Starfield ===
    /// Number of decorative stars; `None` derives it from the space size
    pub star_count: Option<usize>,
    pub star_margin: f64,

    // === Docking ===
    pub departure_offset: f64,

    // === Loop ===
    pub physics_hz: f64,
    pub display_hz: f64,
    pub stop_timeout_ms: u64,
    pub idle_sleep_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            space_size: SPACE_SIZE,

            craft_radius: CRAFT_RADIUS,
            craft_immunity_ticks: CRAFT_IMMUNITY_TICKS,
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            rotation_per_tick: ROTATION_PER_TICK,
            damping: DAMPING,
            craft_color: CRAFT_COLOR,

            celestial_radius: CELESTIAL_RADIUS,
            celestial_immunity_ticks: CELESTIAL_IMMUNITY_TICKS,
            celestial_collisions: false,

            placement_min: DVec2::new(PLACEMENT_MIN_X, PLACEMENT_MIN_Y),
            placement_max_margin: PLACEMENT_MAX_MARGIN,
            placement_separation: PLACEMENT_SEPARATION,
            placement_attempts: PLACEMENT_ATTEMPTS,

            star_count: None,
            star_margin: STAR_MARGIN,

            departure_offset: DEPARTURE_OFFSET,

            physics_hz: PHYSICS_HZ,
            display_hz: DISPLAY_HZ,
            stop_timeout_ms: STOP_TIMEOUT_MS,
            idle_sleep_ms: IDLE_SLEEP_MS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check that the settings describe a playable world
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.space_size.is_finite() && self.space_size > 0.0) {
            return Err(invalid("space_size", "must be positive"));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(invalid("damping", format!("{} is outside (0, 1)", self.damping)));
        }
        if !(self.max_speed > 0.0) {
            return Err(invalid("max_speed", "must be positive"));
        }
        if !(self.physics_hz > 0.0) {
            return Err(invalid("physics_hz", "must be positive"));
        }
        if !(self.display_hz > 0.0) {
            return Err(invalid("display_hz", "must be positive"));
        }
        let (lo, hi) = self.placement_range();
        if lo.x >= hi.x || lo.y >= hi.y {
            return Err(invalid(
                "placement_min",
                format!("placement range {lo:?}..{hi:?} is empty"),
            ));
        }
        if 2.0 * self.star_margin >= self.space_size {
            return Err(invalid("star_margin", "leaves no room for stars"));
        }
        if self.placement_attempts == 0 {
            return Err(invalid("placement_attempts", "must be at least 1"));
        }
        if self.departure_offset <= self.craft_radius + self.celestial_radius {
            return Err(invalid(
                "departure_offset",
                "must exceed craft_radius + celestial_radius",
            ));
        }
        Ok(())
    }

    /// Half-open box celestial centers are sampled from
    pub fn placement_range(&self) -> (DVec2, DVec2) {
        let hi = DVec2::splat(self.space_size - self.placement_max_margin);
        (self.placement_min, hi)
    }

    /// Number of stars to scatter
    pub fn star_count(&self) -> usize {
        self.star_count
            .unwrap_or((self.space_size / STAR_DENSITY) as usize)
    }

    /// Center of the play space (craft spawn point)
    pub fn center(&self) -> DVec2 {
        DVec2::splat(self.space_size / 2.0)
    }

    pub fn physics_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.physics_hz)
    }

    pub fn display_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.display_hz)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    pub fn idle_sleep(&self) -> Duration {
        Duration::from_millis(self.idle_sleep_ms)
    }
}

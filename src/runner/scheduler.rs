//! Dual-rate fixed step scheduler
//!
//! Physics and display each keep their own accumulator of elapsed time. When
//! an accumulator reaches its period the subsystem fires and the accumulator
//! starts over from zero. A stalled loop therefore fires once when it resumes
//! instead of replaying the missed steps.

use std::time::Duration;

use crate::settings::Settings;

/// What fired during one [`FixedStepScheduler::advance`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub physics: bool,
    pub display: bool,
    /// Time accumulated toward the next physics tick, for interpolation
    pub since_tick: Duration,
}

#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    physics_period: Duration,
    display_period: Duration,
    since_tick: Duration,
    since_frame: Duration,
}

impl FixedStepScheduler {
    pub fn new(physics_period: Duration, display_period: Duration) -> Self {
        Self {
            physics_period,
            display_period,
            since_tick: Duration::ZERO,
            since_frame: Duration::ZERO,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.physics_period(), settings.display_period())
    }

    /// Feed elapsed wall-clock time since the previous call
    pub fn advance(&mut self, elapsed: Duration) -> Fired {
        self.since_tick += elapsed;
        self.since_frame += elapsed;

        let physics = self.since_tick >= self.physics_period;
        if physics {
            self.since_tick = Duration::ZERO;
        }
        let display = self.since_frame >= self.display_period;
        if display {
            self.since_frame = Duration::ZERO;
        }

        Fired {
            physics,
            display,
            since_tick: self.since_tick,
        }
    }

    pub fn physics_period(&self) -> Duration {
        self.physics_period
    }

    pub fn display_period(&self) -> Duration {
        self.display_period
    }
}

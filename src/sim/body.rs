//! Kinematic body shared by the craft and every celestial

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Position, velocity and collision bookkeeping for anything that moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: DVec2,
    /// Pixels per tick
    pub vel: DVec2,
    pub radius: f64,
    /// Ticks left before this body may collide (spawn grace period)
    pub immunity_ticks: u32,
    pub destroyed: bool,
}

impl Body {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, immunity_ticks: u32) -> Self {
        Self {
            pos,
            vel,
            radius,
            immunity_ticks,
            destroyed: false,
        }
    }

    /// Advance one tick: integrate, stop at the walls, count down immunity
    pub fn advance(&mut self, space_size: f64) {
        if !self.vel.is_finite() {
            self.vel = DVec2::new(finite_or_zero(self.vel.x), finite_or_zero(self.vel.y));
        }
        self.pos += self.vel;
        self.clamp_to_space(space_size);
        self.immunity_ticks = self.immunity_ticks.saturating_sub(1);
    }

    /// Keep the body inside `[0, space_size]`, zeroing velocity on any axis
    /// that hit a wall
    pub fn clamp_to_space(&mut self, space_size: f64) {
        self.pos.x = finite_or_zero(self.pos.x);
        self.pos.y = finite_or_zero(self.pos.y);

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = 0.0;
        } else if self.pos.x > space_size {
            self.pos.x = space_size;
            self.vel.x = 0.0;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = 0.0;
        } else if self.pos.y > space_size {
            self.pos.y = space_size;
            self.vel.y = 0.0;
        }
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Immunity expired and still intact
    #[inline]
    pub fn can_collide(&self) -> bool {
        self.immunity_ticks == 0 && !self.destroyed
    }

    /// Centers closer than the radius sum, and both bodies eligible
    pub fn collides(&self, other: &Body) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
            && self.can_collide()
            && other.can_collide()
    }

    /// Mark as destroyed (terminal for celestials)
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

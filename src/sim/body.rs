//! The player-controlled body
//!
//! Only vertical motion is simulated; the horizontal position is fixed by
//! configuration and the world scrolls past it.

use serde::{Deserialize, Serialize};

use crate::consts::{ROTATION_MAX_DEG, ROTATION_MIN_DEG};

/// Falling body with per-tick integration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top edge of the body
    pub y: f32,
    /// Vertical velocity, positive = downward
    pub velocity_y: f32,
    /// Degrees of tilt per unit of velocity
    rotation_factor: f32,
}

impl Body {
    pub fn new(y: f32, rotation_factor: f32) -> Self {
        Self {
            y,
            velocity_y: 0.0,
            rotation_factor,
        }
    }

    /// Accumulate one tick of gravity, then move by the new velocity
    pub fn apply_gravity_tick(&mut self, gravity: f32) {
        self.velocity_y += gravity;
        self.y += self.velocity_y;
    }

    /// Flap: the velocity is replaced, not added to
    pub fn apply_impulse(&mut self, force: f32) {
        self.velocity_y = force;
    }

    pub fn reset(&mut self, initial_y: f32) {
        self.y = initial_y;
        self.velocity_y = 0.0;
    }

    /// Display tilt derived from velocity, clamped to [-25, 80] degrees
    pub fn rotation_deg(&self) -> f32 {
        (self.velocity_y * self.rotation_factor).clamp(ROTATION_MIN_DEG, ROTATION_MAX_DEG)
    }
}

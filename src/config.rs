//! Simulation tuning and presets
//!
//! Every value is fixed when a [`Session`](crate::Session) is built. The three
//! presets cover the shipped variants of the game; they differ only in tuning.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    #[default]
    Classic,
    /// Faster scroll, tighter gaps
    Neon,
    /// Floaty and forgiving
    Zen,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Neon => "Neon",
            Preset::Zen => "Zen",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "neon" => Some(Preset::Neon),
            "zen" => Some(Preset::Zen),
            _ => None,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Body physics (per tick) ===
    pub gravity: f32,
    pub jump_force: f32,
    pub launch_force: f32,
    pub rotation_factor: f32,

    // === Obstacles ===
    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub gap_margin: f32,
    /// Seconds of host time between spawns
    pub spawn_interval: f64,
    pub cull_tolerance: f32,

    // === Field ===
    pub play_height: f32,
    pub field_width: f32,

    // === Body geometry ===
    pub body_x: f32,
    pub body_width: f32,
    pub body_height: f32,
    pub rest_y: f32,
    pub hitbox_inset: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            launch_force: LAUNCH_FORCE,
            rotation_factor: ROTATION_FACTOR,

            obstacle_speed: OBSTACLE_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            gap_margin: GAP_MARGIN,
            spawn_interval: SPAWN_INTERVAL,
            cull_tolerance: CULL_TOLERANCE,

            play_height: PLAY_HEIGHT,
            field_width: FIELD_WIDTH,

            body_x: BODY_X,
            body_width: BODY_WIDTH,
            body_height: BODY_HEIGHT,
            rest_y: REST_Y,
            hitbox_inset: HITBOX_INSET,
        }
    }
}

impl SimConfig {
    /// Tuning for a preset
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        match preset {
            Preset::Classic => {}
            Preset::Neon => {
                config.obstacle_speed = 4.0;
                config.gap_height = 140.0;
                config.spawn_interval = 1.3;
                config.gravity = 0.7;
                config.jump_force = -11.0;
                config.launch_force = -11.0;
            }
            Preset::Zen => {
                config.obstacle_speed = 2.5;
                config.gap_height = 190.0;
                config.spawn_interval = 2.0;
                config.gravity = 0.45;
                config.jump_force = -8.5;
                config.launch_force = -8.5;
            }
        }
        config
    }

    /// Parse and validate a JSON config; missing fields take `Classic` values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Valid range for obstacle gap centers
    pub fn gap_range(&self) -> (f32, f32) {
        let half = self.gap_height / 2.0;
        (
            half + self.gap_margin,
            self.play_height - half - self.gap_margin,
        )
    }

    /// Reject configurations that would make the game unplayable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("launch_force", self.launch_force),
            ("rotation_factor", self.rotation_factor),
            ("body_x", self.body_x),
            ("rest_y", self.rest_y),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        let positive = [
            ("obstacle_speed", self.obstacle_speed as f64),
            ("obstacle_width", self.obstacle_width as f64),
            ("gap_height", self.gap_height as f64),
            ("spawn_interval", self.spawn_interval),
            ("play_height", self.play_height as f64),
            ("field_width", self.field_width as f64),
            ("body_width", self.body_width as f64),
            ("body_height", self.body_height as f64),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("gap_margin", self.gap_margin),
            ("cull_tolerance", self.cull_tolerance),
            ("hitbox_inset", self.hitbox_inset),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative {
                    field,
                    value: value as f64,
                });
            }
        }

        if self.gap_height + 2.0 * self.gap_margin > self.play_height {
            return Err(ConfigError::GapTooLarge {
                gap_height: self.gap_height,
                margin: self.gap_margin,
                play_height: self.play_height,
            });
        }

        if 2.0 * self.hitbox_inset >= self.body_width.min(self.body_height) {
            return Err(ConfigError::InsetTooLarge {
                inset: self.hitbox_inset,
                width: self.body_width,
                height: self.body_height,
            });
        }

        // Starting inside the ceiling or floor band would crash on the first tick
        if self.rest_y <= 0.0 || self.rest_y + self.body_height >= self.play_height {
            return Err(ConfigError::RestOutOfBounds {
                rest_y: self.rest_y,
                play_height: self.play_height,
            });
        }

        Ok(())
    }
}

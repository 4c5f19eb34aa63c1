//! Construction-time errors
//!
//! Steady-state ticking never fails; everything that can go wrong is caught
//! when a [`SimConfig`](crate::SimConfig) is validated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "gap height {gap_height} plus margins 2 x {margin} exceeds play height {play_height}"
    )]
    GapTooLarge {
        gap_height: f32,
        margin: f32,
        play_height: f32,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("hitbox inset {inset} leaves no collidable area on a {width}x{height} body")]
    InsetTooLarge { inset: f32, width: f32, height: f32 },

    #[error("rest position {rest_y} puts the body outside the play field (height {play_height})")]
    RestOutOfBounds { rest_y: f32, play_height: f32 },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick physics only (no wall-clock integration)
//! - Injected RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod demo;
pub mod obstacle;
pub mod random;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{Hitbox, ObstacleShape, collides};
pub use demo::autopilot;
pub use obstacle::{Obstacle, ObstacleField};
pub use random::{GapSource, PcgGapSource};
pub use state::{EVENT_WINDOW, GameEvent, GamePhase, SequencedEvent, Session, Snapshot};

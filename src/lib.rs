//! Skyhop - a one-button side-scrolling flyer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body physics, obstacles, collisions, session state)
//! - `scheduler`: Frame driver and snapshot hand-off to presenters
//! - `config`: Tuning constants and presets
//! - `persistence`: Best-score storage
//! - `platform`: Browser host glue

pub mod config;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod scheduler;
pub mod sim;

pub use config::{Preset, SimConfig};
pub use error::ConfigError;
pub use persistence::{BestScoreStore, MemoryStore};
pub use scheduler::{Clock, InputLatch, Scheduler, SnapshotHandle, StopHandle};
pub use sim::{GamePhase, Session, Snapshot};

/// Default tuning constants (the `Classic` preset)
///
/// Distances are pixels, velocities are pixels per tick, and the spawn
/// interval is seconds of host time.
pub mod consts {
    /// Downward acceleration added to velocity every tick
    pub const GRAVITY: f32 = 0.6;
    /// Velocity set-point applied on every flap (negative = up)
    pub const JUMP_FORCE: f32 = -10.0;
    /// Velocity set-point applied when a run starts
    pub const LAUNCH_FORCE: f32 = -10.0;

    /// Horizontal obstacle speed
    pub const OBSTACLE_SPEED: f32 = 3.0;
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    /// Height of the passable opening
    pub const GAP_HEIGHT: f32 = 160.0;
    /// Minimum distance between a gap edge and the ceiling/floor
    pub const GAP_MARGIN: f32 = 50.0;
    /// Seconds between obstacle spawns
    pub const SPAWN_INTERVAL: f64 = 1.6;
    /// How far past the left edge an obstacle may travel before it is culled
    pub const CULL_TOLERANCE: f32 = 10.0;

    /// Collidable play-field (ground decoration excluded)
    pub const PLAY_HEIGHT: f32 = 600.0;
    pub const FIELD_WIDTH: f32 = 400.0;

    /// Body geometry
    pub const BODY_X: f32 = 80.0;
    pub const BODY_WIDTH: f32 = 34.0;
    pub const BODY_HEIGHT: f32 = 24.0;
    pub const REST_Y: f32 = 240.0;
    /// Hitbox shrink applied to each side of the body sprite
    pub const HITBOX_INSET: f32 = 4.0;

    /// Degrees of rotation per unit of vertical velocity
    pub const ROTATION_FACTOR: f32 = 4.0;
    pub const ROTATION_MIN_DEG: f32 = -25.0;
    pub const ROTATION_MAX_DEG: f32 = 80.0;
}

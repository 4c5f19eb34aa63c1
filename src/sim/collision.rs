//! Collision detection between the body, the field bounds and obstacles
//!
//! Bounds use the full body rectangle. Obstacle tests use a hitbox shrunk by
//! the configured inset on every side, so grazing a pipe edge with the sprite
//! is forgiven.

use glam::Vec2;

use super::obstacle::Obstacle;

/// Axis-aligned body rectangle in play-field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl Hitbox {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink every side by `inset`
    pub fn inset(&self, inset: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(inset),
            max: self.max - Vec2::splat(inset),
        }
    }

    /// Open-interval overlap with the horizontal span `[left, right]`
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.min.x < right && self.max.x > left
    }

    /// Whether the vertical extent lies within `[top, bottom]`
    #[inline]
    pub fn within_y(&self, top: f32, bottom: f32) -> bool {
        self.min.y >= top && self.max.y <= bottom
    }
}

/// Obstacle geometry needed for the test
#[derive(Debug, Clone, Copy)]
pub struct ObstacleShape {
    pub width: f32,
    pub gap_height: f32,
}

/// True if the body touches the ceiling, the floor or any obstacle outside its gap
pub fn collides(
    body: &Hitbox,
    play_height: f32,
    obstacles: &[Obstacle],
    shape: ObstacleShape,
    inset: f32,
) -> bool {
    if body.min.y <= 0.0 || body.max.y >= play_height {
        return true;
    }

    let hitbox = body.inset(inset);
    obstacles.iter().any(|obstacle| {
        if !hitbox.overlaps_x(obstacle.x, obstacle.trailing_edge(shape.width)) {
            return false;
        }
        let (top, bottom) = obstacle.gap_span(shape.gap_height);
        !hitbox.within_y(top, bottom)
    })
}

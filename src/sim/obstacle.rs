//! Scrolling obstacle pairs
//!
//! Obstacles are kept in spawn order, which is also descending `x` since they
//! all move at the same speed.

use serde::{Deserialize, Serialize};

use super::random::GapSource;
use crate::config::SimConfig;

/// An obstacle pair with one passable gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    pub gap_center_y: f32,
    pub scored: bool,
}

impl Obstacle {
    /// Right edge
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Vertical extent of the gap as (top, bottom)
    #[inline]
    pub fn gap_span(&self, gap_height: f32) -> (f32, f32) {
        let half = gap_height / 2.0;
        (self.gap_center_y - half, self.gap_center_y + half)
    }
}

/// Ordered obstacle collection with its spawn timer and id counter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Host time of the last spawn (`None` until the first spawn of a run)
    last_spawn: Option<f64>,
    next_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Remove every obstacle and restart the spawn timer. Ids keep counting.
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.last_spawn = None;
    }

    /// Spawn at the right edge when the interval has elapsed or the field is empty.
    ///
    /// Returns the id of the new obstacle, if any.
    pub fn try_spawn(
        &mut self,
        now: f64,
        config: &SimConfig,
        rng: &mut dyn GapSource,
    ) -> Option<u32> {
        let elapsed = self.last_spawn.map(|last| now - last > config.spawn_interval);
        if !self.obstacles.is_empty() && elapsed != Some(true) {
            return None;
        }

        let (min, max) = config.gap_range();
        // Out-of-range draws are clamped; NaN and infinities fall back to `min`
        let draw = rng.uniform(min, max);
        let gap_center_y = if draw.is_finite() {
            draw.clamp(min, max)
        } else {
            min
        };

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x: config.field_width + config.obstacle_width,
            gap_center_y,
            scored: false,
        });
        self.last_spawn = Some(now);
        Some(id)
    }

    /// Scroll every obstacle left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Drop obstacles whose trailing edge is past `-tolerance`. Returns how many were removed.
    pub fn cull_offscreen(&mut self, obstacle_width: f32, tolerance: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles
            .retain(|o| o.trailing_edge(obstacle_width) >= -tolerance);
        before - self.obstacles.len()
    }

    /// Mark obstacles whose trailing edge has passed `body_x`.
    ///
    /// Returns the number newly marked this call.
    pub fn collect_scored(&mut self, body_x: f32, obstacle_width: f32) -> u32 {
        let mut count = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.scored && obstacle.trailing_edge(obstacle_width) < body_x {
                obstacle.scored = true;
                count += 1;
            }
        }
        count
    }

    #[cfg(test)]
    pub(crate) fn push_for_test(&mut self, x: f32, gap_center_y: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x,
            gap_center_y,
            scored: false,
        });
        id
    }
}

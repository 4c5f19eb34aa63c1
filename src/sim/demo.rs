//! Demo autopilot
//!
//! Plays the game from snapshots alone, the same way a presenter sees it.
//! Used by the headless runner and as an idle/attract mode.

use super::state::{GamePhase, Snapshot};
use crate::config::SimConfig;

/// Decide whether to activate this frame
pub fn autopilot(snapshot: &Snapshot, config: &SimConfig) -> bool {
    match snapshot.phase {
        GamePhase::Menu | GamePhase::GameOver => true,
        GamePhase::Playing => {
            // Aim for the first obstacle the body hasn't cleared yet
            let target = snapshot
                .obstacles
                .iter()
                .find(|o| o.trailing_edge(config.obstacle_width) >= config.body_x)
                .map(|o| o.gap_center_y)
                .unwrap_or(config.play_height / 2.0);

            let body_center = snapshot.body_pos.y + config.body_height / 2.0;
            let falling = snapshot.body_velocity_y >= 0.0;
            falling && body_center > target + config.gap_height * 0.1
        }
    }
}

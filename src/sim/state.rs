//! Session state and the published snapshot
//!
//! The [`Session`] is the single owner and writer of simulation truth. Anything
//! outside the simulation only ever sees a [`Snapshot`] copy.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::Hitbox;
use super::obstacle::{Obstacle, ObstacleField};
use super::random::GapSource;
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::persistence::BestScoreStore;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended; simulation frozen until the next tap
    GameOver,
}

/// Events kept in the recent-events window
pub const EVENT_WINDOW: usize = 64;

/// Things that happened during a session, for audio/haptics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flap,
    /// `count` obstacles were passed this tick
    Scored { count: u32, score: u32 },
    Crashed { score: u32 },
    NewBest { score: u32 },
    ReturnedToMenu,
}

/// A [`GameEvent`] tagged with its position in the session's event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// Starts at 0 and increases by one per event
    pub seq: u64,
    pub event: GameEvent,
}

/// Immutable per-tick view handed to presenters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Playing ticks simulated so far
    pub tick: u64,
    pub phase: GamePhase,
    /// Top-left corner of the body
    pub body_pos: Vec2,
    pub body_velocity_y: f32,
    pub body_rotation_deg: f32,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub best_score: u32,
    /// The last [`EVENT_WINDOW`] events, oldest first
    pub events: Vec<SequencedEvent>,
    /// Sequence number the next event will get
    pub next_event_seq: u64,
}

impl Snapshot {
    /// Events with `seq >= cursor`.
    ///
    /// Readers keep `next_event_seq` from the last snapshot they handled and
    /// pass it back here, so skipped snapshots don't lose events as long as
    /// fewer than [`EVENT_WINDOW`] happened in between.
    pub fn events_since(&self, cursor: u64) -> impl Iterator<Item = &GameEvent> + '_ {
        self.events
            .iter()
            .filter(move |e| e.seq >= cursor)
            .map(|e| &e.event)
    }

    /// True if events between `cursor` and the window start were dropped
    pub fn missed_events(&self, cursor: u64) -> bool {
        self.events.first().is_some_and(|e| e.seq > cursor)
    }
}

/// The game session: lifecycle, scoring and the simulated world
pub struct Session {
    pub(crate) config: SimConfig,
    pub(crate) phase: GamePhase,
    pub(crate) body: Body,
    pub(crate) field: ObstacleField,
    pub(crate) score: u32,
    pub(crate) best_score: u32,
    pub(crate) time_ticks: u64,
    events: VecDeque<SequencedEvent>,
    next_event_seq: u64,
    pub(crate) rng: Box<dyn GapSource + Send>,
    store: Box<dyn BestScoreStore + Send>,
}

impl Session {
    /// Validate `config` and load the stored best score
    pub fn new(
        config: SimConfig,
        rng: Box<dyn GapSource + Send>,
        mut store: Box<dyn BestScoreStore + Send>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let best_score = store.load();
        let body = Body::new(config.rest_y, config.rotation_factor);

        Ok(Self {
            config,
            phase: GamePhase::Menu,
            body,
            field: ObstacleField::new(),
            score: 0,
            best_score,
            time_ticks: 0,
            events: VecDeque::with_capacity(EVENT_WINDOW),
            next_event_seq: 0,
            rng,
            store,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.obstacles()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Full body rectangle
    pub fn body_hitbox(&self) -> Hitbox {
        Hitbox::new(
            Vec2::new(self.config.body_x, self.body.y),
            Vec2::new(self.config.body_width, self.config.body_height),
        )
    }

    /// Copy current state into a snapshot
    pub fn publish(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            body_pos: Vec2::new(self.config.body_x, self.body.y),
            body_velocity_y: self.body.velocity_y,
            body_rotation_deg: self.body.rotation_deg(),
            obstacles: self.field.obstacles().to_vec(),
            score: self.score,
            best_score: self.best_score,
            events: self.events.iter().copied().collect(),
            next_event_seq: self.next_event_seq,
        }
    }

    /// Append to the event window, dropping the oldest entry when full
    pub(crate) fn emit(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_WINDOW {
            self.events.pop_front();
        }
        self.events.push_back(SequencedEvent {
            seq: self.next_event_seq,
            event,
        });
        self.next_event_seq += 1;
    }

    /// Back to the starting position with an empty field and zero score
    pub(crate) fn reset_run(&mut self) {
        self.body.reset(self.config.rest_y);
        self.field.clear();
        self.score = 0;
    }

    /// Playing -> GameOver
    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.emit(GameEvent::Crashed { score: self.score });
        log::info!("Crashed with score {} (best {})", self.score, self.best_score);

        if self.score > self.best_score {
            self.best_score = self.score;
            self.store.save(self.best_score);
            self.emit(GameEvent::NewBest {
                score: self.best_score,
            });
            log::info!("New best score: {}", self.best_score);
        }
    }
}

//! Per-tick simulation step and input handling
//!
//! Physics advances by whole ticks, not elapsed seconds: one call to
//! [`Session::tick`] is one gravity step and one scroll step. Host time is only
//! used to pace obstacle spawns.

use super::collision::{ObstacleShape, collides};
use super::state::{GameEvent, GamePhase, Session};

impl Session {
    /// Handle one activation (tap/click/space)
    ///
    /// Hosts should coalesce activations arriving between two ticks into a
    /// single call.
    pub fn on_input(&mut self) {
        match self.phase {
            GamePhase::Menu => {
                self.reset_run();
                self.body.apply_impulse(self.config.launch_force);
                self.phase = GamePhase::Playing;
                self.emit(GameEvent::Started);
                log::info!("Run started");
            }
            GamePhase::Playing => {
                self.body.apply_impulse(self.config.jump_force);
                self.emit(GameEvent::Flap);
            }
            GamePhase::GameOver => {
                self.reset_run();
                self.phase = GamePhase::Menu;
                self.emit(GameEvent::ReturnedToMenu);
                log::info!("Returned to menu");
            }
        }
    }

    /// Advance the simulation by one tick. `now` is host time in seconds.
    ///
    /// Menu and GameOver ticks are no-ops.
    pub fn tick(&mut self, now: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.time_ticks += 1;
        self.body.apply_gravity_tick(self.config.gravity);

        // Spawn, advance, cull, score: a fresh obstacle can't be culled or
        // scored on the tick it appears
        if let Some(id) = self.field.try_spawn(now, &self.config, &mut *self.rng) {
            log::debug!("Spawned obstacle {} at t={:.3}", id, now);
        }
        self.field.advance(self.config.obstacle_speed);
        self.field
            .cull_offscreen(self.config.obstacle_width, self.config.cull_tolerance);

        let newly_scored = self
            .field
            .collect_scored(self.config.body_x, self.config.obstacle_width);
        if newly_scored > 0 {
            self.score += newly_scored;
            self.emit(GameEvent::Scored {
                count: newly_scored,
                score: self.score,
            });
        }

        let shape = ObstacleShape {
            width: self.config.obstacle_width,
            gap_height: self.config.gap_height,
        };
        if collides(
            &self.body_hitbox(),
            self.config.play_height,
            self.field.obstacles(),
            shape,
            self.config.hitbox_inset,
        ) {
            self.end_run();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::persistence::MemoryStore;
    use crate::sim::random::PcgGapSource;
    use crate::sim::state::EVENT_WINDOW;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn session_with(config: SimConfig, store: MemoryStore) -> Session {
        Session::new(
            config,
            Box::new(|min: f32, max: f32| (min + max) / 2.0),
            Box::new(store),
        )
        .expect("valid config")
    }

    /// Gravity-free body parked inside every gap centered at 250
    fn hover_session(store: MemoryStore) -> Session {
        let config = SimConfig {
            gravity: 0.0,
            launch_force: 0.0,
            ..Default::default()
        };
        Session::new(config, Box::new(|_min: f32, _max: f32| 250.0_f32), Box::new(store))
            .expect("valid config")
    }

    fn ticks(session: &mut Session, from: u32, to: u32) {
        for t in from..=to {
            session.tick(t as f64 / 60.0);
        }
    }

    #[test]
    fn test_menu_tick_is_noop() {
        let mut session = session_with(SimConfig::default(), MemoryStore::default());
        let before = session.publish();
        ticks(&mut session, 1, 10);
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.publish(), before);
    }

    #[test]
    fn test_first_fall_tick() {
        let config = SimConfig {
            launch_force: 0.0,
            ..Default::default()
        };
        let rest_y = config.rest_y;
        let mut session = session_with(config, MemoryStore::default());

        session.on_input();
        assert_eq!(session.phase(), GamePhase::Playing);
        session.tick(0.0);
        assert!((session.body().velocity_y - 0.6).abs() < 1e-6);
        assert!((session.body().y - (rest_y + 0.6)).abs() < 1e-4);
    }

    #[test]
    fn test_launch_and_flap_set_velocity() {
        let mut session = session_with(SimConfig::default(), MemoryStore::default());
        session.on_input();
        assert_eq!(session.body().velocity_y, -10.0);
        assert_eq!(session.body().rotation_deg(), -25.0);

        ticks(&mut session, 1, 5);
        session.on_input();
        assert_eq!(session.body().velocity_y, -10.0);

        let snapshot = session.publish();
        let events: Vec<GameEvent> = snapshot.events_since(0).copied().collect();
        assert_eq!(events.first(), Some(&GameEvent::Started));
        assert_eq!(events.last(), Some(&GameEvent::Flap));
        // Nothing new past the cursor until the next event
        let cursor = snapshot.next_event_seq;
        assert_eq!(session.publish().events_since(cursor).count(), 0);
        session.on_input();
        let newer: Vec<GameEvent> = session.publish().events_since(cursor).copied().collect();
        assert_eq!(newer, vec![GameEvent::Flap]);
    }

    #[test]
    fn test_event_window_is_bounded() {
        let mut session = session_with(SimConfig::default(), MemoryStore::default());
        session.on_input();
        // Never published: the window must not grow past its cap
        for _ in 0..500 {
            session.on_input();
        }

        let snapshot = session.publish();
        assert_eq!(snapshot.events.len(), EVENT_WINDOW);
        assert_eq!(snapshot.next_event_seq, 501);
        assert_eq!(snapshot.events.last().map(|e| e.seq), Some(500));
        assert_eq!(
            snapshot.events.first().map(|e| e.seq),
            Some(501 - EVENT_WINDOW as u64)
        );
        assert!(snapshot.missed_events(0));
        assert!(!snapshot.missed_events(501 - EVENT_WINDOW as u64));
    }

    #[test]
    fn test_first_tick_spawns_without_scoring() {
        let mut session = session_with(SimConfig::default(), MemoryStore::default());
        session.on_input();
        session.tick(0.0);

        let config = session.config().clone();
        assert_eq!(session.obstacles().len(), 1);
        let obstacle = session.obstacles()[0];
        assert_eq!(
            obstacle.x,
            config.field_width + config.obstacle_width - config.obstacle_speed
        );
        assert!(!obstacle.scored);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_falling_body_hits_floor() {
        let config = SimConfig {
            launch_force: 0.0,
            ..Default::default()
        };
        let mut session = session_with(config, MemoryStore::default());
        session.on_input();

        // y(n) = 240 + 0.6 n(n+1)/2 reaches the floor (576) at n = 33
        ticks(&mut session, 1, 32);
        assert_eq!(session.phase(), GamePhase::Playing);
        session.tick(33.0 / 60.0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.time_ticks(), 33);
    }

    #[test]
    fn test_full_lifecycle() {
        let store = MemoryStore::new(1);
        let mut session = hover_session(store.clone());
        assert_eq!(session.best_score(), 1);

        // Menu -> Playing
        session.on_input();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 0);

        // Three obstacles pass the body in 400 ticks
        ticks(&mut session, 1, 400);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 3);

        // Flap with no gravity: the body rises until it crashes
        session.on_input();
        let mut t = 401;
        while session.phase() == GamePhase::Playing && t < 500 {
            session.tick(t as f64 / 60.0);
            t += 1;
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.best_score(), 3);
        assert_eq!(store.value(), 3);
        let events: Vec<GameEvent> = session.publish().events_since(0).copied().collect();
        assert!(events.contains(&GameEvent::Crashed { score: 3 }));
        assert!(events.contains(&GameEvent::NewBest { score: 3 }));

        // GameOver ticks are frozen
        let frozen = session.publish();
        ticks(&mut session, t, t + 50);
        assert_eq!(session.publish(), frozen);

        // GameOver -> Menu
        session.on_input();
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.score(), 0);
        assert_eq!(session.best_score(), 3);
        assert!(session.obstacles().is_empty());
        assert_eq!(session.body().y, session.config().rest_y);
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let store = MemoryStore::new(10);
        let config = SimConfig {
            launch_force: 0.0,
            ..Default::default()
        };
        let mut session = session_with(config, store.clone());
        session.on_input();
        ticks(&mut session, 1, 40);

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.best_score(), 10);
        assert_eq!(store.value(), 10);
        let snapshot = session.publish();
        assert!(
            !snapshot
                .events_since(0)
                .any(|e| matches!(e, GameEvent::NewBest { .. }))
        );
        assert!(
            snapshot
                .events_since(0)
                .any(|e| matches!(e, GameEvent::Crashed { score: 0 }))
        );
    }

    #[test]
    fn test_restart_resets_score_and_timer() {
        let mut session = hover_session(MemoryStore::default());
        session.on_input();
        ticks(&mut session, 1, 200);
        assert_eq!(session.score(), 1);

        session.body.apply_impulse(-50.0);
        ticks(&mut session, 201, 210);
        assert_eq!(session.phase(), GamePhase::GameOver);

        session.on_input();
        session.on_input();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 0);
        assert!(session.obstacles().is_empty());

        // Spawn timer restarted: the first tick of the new run spawns at once
        session.tick(211.0 / 60.0);
        assert_eq!(session.obstacles().len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs produce identical snapshots
        let make = || {
            Session::new(
                SimConfig::default(),
                Box::new(PcgGapSource::new(99999)),
                Box::new(MemoryStore::default()),
            )
            .expect("valid config")
        };
        let mut a = make();
        let mut b = make();

        for t in 0..600u32 {
            if t % 25 == 0 {
                a.on_input();
                b.on_input();
            }
            let now = t as f64 / 60.0;
            a.tick(now);
            b.tick(now);
            assert_eq!(a.publish(), b.publish());
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Input,
        Tick,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![1 => Just(Op::Input), 6 => Just(Op::Tick)]
    }

    proptest! {
        #[test]
        fn prop_state_machine_closure(ops in prop::collection::vec(op(), 1..800), seed in any::<u64>()) {
            let mut session = Session::new(
                SimConfig::default(),
                Box::new(PcgGapSource::new(seed)),
                Box::new(MemoryStore::default()),
            )
            .expect("valid config");

            let mut t = 0u32;
            for op in ops {
                let phase = session.phase();
                let score = session.score();
                let best = session.best_score();
                match op {
                    Op::Input => {
                        session.on_input();
                        let expected = match phase {
                            GamePhase::Menu => GamePhase::Playing,
                            GamePhase::Playing => GamePhase::Playing,
                            GamePhase::GameOver => GamePhase::Menu,
                        };
                        prop_assert_eq!(session.phase(), expected);
                        if phase != GamePhase::Playing {
                            prop_assert_eq!(session.score(), 0);
                        }
                        prop_assert_eq!(session.best_score(), best);
                    }
                    Op::Tick => {
                        let unscored: HashSet<u32> = session
                            .obstacles()
                            .iter()
                            .filter(|o| !o.scored)
                            .map(|o| o.id)
                            .collect();
                        t += 1;
                        session.tick(t as f64 / 60.0);
                        // Culling runs before scoring, so every obstacle scored
                        // this tick is still in the field
                        let flipped = session
                            .obstacles()
                            .iter()
                            .filter(|o| o.scored && unscored.contains(&o.id))
                            .count() as u32;
                        match phase {
                            GamePhase::Menu => {
                                prop_assert_eq!(session.phase(), GamePhase::Menu);
                            }
                            GamePhase::GameOver => {
                                prop_assert_eq!(session.phase(), GamePhase::GameOver);
                                prop_assert_eq!(session.score(), score);
                                prop_assert_eq!(session.best_score(), best);
                            }
                            GamePhase::Playing => {
                                prop_assert_eq!(session.score() - score, flipped);
                                if session.phase() == GamePhase::GameOver {
                                    prop_assert_eq!(session.best_score(), best.max(session.score()));
                                } else {
                                    prop_assert_eq!(session.best_score(), best);
                                }
                            }
                        }
                    }
                }
                prop_assert!(session.best_score() >= best);
            }
        }
    }
}

//! Frame driver and snapshot hand-off
//!
//! The [`Scheduler`] owns the [`Session`] and is the only thing that calls
//! into it. Presenters hold a [`SnapshotHandle`] and read whole snapshots;
//! input sources hold an [`InputLatch`]. Both handles are cheap to clone and
//! safe to use from other threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

use crate::sim::{Session, Snapshot};

/// Coalescing activation flag. Any number of taps between frames count once.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    pending: Arc<AtomicBool>,
}

impl InputLatch {
    pub fn activate(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Consume the pending activation, if any
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

/// Read-only access to the latest published snapshot
#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    latest: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotHandle {
    fn new(initial: Snapshot) -> Self {
        Self {
            latest: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// The most recent complete snapshot. Never a mix of two ticks.
    pub fn latest(&self) -> Arc<Snapshot> {
        Arc::clone(&self.latest.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}

/// Stops a scheduler from another owner (view teardown, signal handler)
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Source of host time for [`Scheduler::run`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clock {
    /// Seconds since the loop started
    Wall,
    /// Virtual time advancing by `step` seconds per frame (headless replay)
    Fixed { step: f64 },
}

/// Drives a session once per frame
pub struct Scheduler {
    session: Session,
    snapshots: SnapshotHandle,
    input: InputLatch,
    stop: StopHandle,
    last_now: f64,
    frames: u64,
}

impl Scheduler {
    pub fn new(session: Session) -> Self {
        let snapshots = SnapshotHandle::new(session.publish());
        Self {
            session,
            snapshots,
            input: InputLatch::default(),
            stop: StopHandle::default(),
            last_now: 0.0,
            frames: 0,
        }
    }

    pub fn snapshots(&self) -> SnapshotHandle {
        self.snapshots.clone()
    }

    pub fn input_latch(&self) -> InputLatch {
        self.input.clone()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame at host time `now` (seconds).
    ///
    /// Applies any latched input, ticks once and publishes the result.
    /// Returns false once stopped; a stopped scheduler never touches the
    /// session again.
    pub fn frame(&mut self, now: f64) -> bool {
        if self.stop.is_stopped() {
            return false;
        }

        // Time never runs backwards for the session
        let now = if now.is_finite() {
            now.max(self.last_now)
        } else {
            self.last_now
        };
        self.last_now = now;

        if self.input.take() {
            self.session.on_input();
        }
        self.session.tick(now);
        self.snapshots.publish(self.session.publish());
        self.frames += 1;
        true
    }

    /// Blocking frame loop.
    ///
    /// `driver` runs before every frame with the latest snapshot and may
    /// activate input; returning false ends the loop. `pacing` is the sleep
    /// between frames (zero runs flat out).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run<F>(&mut self, clock: Clock, pacing: Duration, mut driver: F)
    where
        F: FnMut(&Snapshot, &InputLatch) -> bool,
    {
        let start = Instant::now();
        let mut frame_index: u64 = 0;

        while !self.is_stopped() {
            let latest = self.snapshots.latest();
            if !driver(&latest, &self.input) {
                break;
            }

            let now = match clock {
                Clock::Wall => start.elapsed().as_secs_f64(),
                Clock::Fixed { step } => frame_index as f64 * step,
            };
            if !self.frame(now) {
                break;
            }
            frame_index += 1;

            if !pacing.is_zero() {
                std::thread::sleep(pacing);
            }
        }

        log::info!("Scheduler loop ended after {} frames", self.frames);
    }
}

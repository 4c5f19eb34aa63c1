//! wasm-bindgen surface for browser presenters
//!
//! JS owns the render loop: it calls `frame(now_ms)` from
//! `requestAnimationFrame`, `activate()` from pointer/key handlers, and reads
//! `snapshot_json()` to draw.

use wasm_bindgen::prelude::*;

use crate::config::{Preset, SimConfig};
use crate::persistence::LocalStorageStore;
use crate::scheduler::{InputLatch, Scheduler, SnapshotHandle};
use crate::sim::{PcgGapSource, Session};

#[wasm_bindgen]
pub struct WebGame {
    scheduler: Scheduler,
    input: InputLatch,
    snapshots: SnapshotHandle,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game for a preset name ("classic", "neon", "zen")
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<WebGame, JsValue> {
        console_error_panic_hook::set_once();
        // A second game on the same page keeps the first logger
        let _ = console_log::init_with_level(log::Level::Info);

        let preset = Preset::from_str(preset).unwrap_or_default();
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            SimConfig::from_preset(preset),
            Box::new(PcgGapSource::new(seed)),
            Box::new(LocalStorageStore),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Skyhop {} started with seed {}", preset.as_str(), seed);

        let scheduler = Scheduler::new(session);
        Ok(WebGame {
            input: scheduler.input_latch(),
            snapshots: scheduler.snapshots(),
            scheduler,
        })
    }

    /// Tap/click/space
    pub fn activate(&self) {
        self.input.activate();
    }

    /// One display frame. `now_ms` is the rAF timestamp.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.scheduler.frame(now_ms / 1000.0)
    }

    /// Latest snapshot as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&*self.snapshots.latest()).unwrap_or_default()
    }

    /// Call on view teardown; later frames are ignored
    pub fn stop(&self) {
        self.scheduler.stop();
    }
}

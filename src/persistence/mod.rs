//! Best-score persistence
//!
//! The session loads the best score once at construction and saves it when a
//! run ends with a new best. Stores never fail loudly: storage problems are
//! logged and the game keeps running with the in-memory value.
//!
//! - [`MemoryStore`]: shared in-process value (tests, headless runs)
//! - [`JsonFileStore`]: JSON file on disk (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32)

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// External best-score storage
pub trait BestScoreStore {
    /// Stored best score, or 0 if nothing valid is stored
    fn load(&mut self) -> u32;
    fn save(&mut self, best_score: u32);
}

/// On-disk/LocalStorage record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub best_score: u32,
}

/// In-memory store. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Arc<Mutex<u32>>,
}

impl MemoryStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn value(&self) -> u32 {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.value()
    }

    fn save(&mut self, best_score: u32) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = best_score;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{BestScoreRecord, BestScoreStore};

    /// Best score kept in a small JSON file
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl BestScoreStore for JsonFileStore {
        fn load(&mut self) -> u32 {
            let json = match fs::read_to_string(&self.path) {
                Ok(json) => json,
                Err(_) => {
                    log::info!("No best score at {}, starting fresh", self.path.display());
                    return 0;
                }
            };
            match serde_json::from_str::<BestScoreRecord>(&json) {
                Ok(record) => {
                    log::info!("Loaded best score {}", record.best_score);
                    record.best_score
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt best score file {}: {}", self.path.display(), e);
                    0
                }
            }
        }

        fn save(&mut self, best_score: u32) {
            let record = BestScoreRecord { best_score };
            let json = match serde_json::to_string(&record) {
                Ok(json) => json,
                Err(e) => {
                    log::warn!("Failed to encode best score: {}", e);
                    return;
                }
            };
            // Write to a sibling temp file first so a crash never leaves a torn record
            let tmp = self.path.with_extension("tmp");
            let result = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, &self.path));
            match result {
                Ok(()) => log::info!("Best score {} saved", best_score),
                Err(e) => log::warn!("Failed to save best score to {}: {}", self.path.display(), e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{BestScoreRecord, BestScoreStore};

    /// Best score kept in browser LocalStorage
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        const STORAGE_KEY: &'static str = "skyhop_best_score";

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl BestScoreStore for LocalStorageStore {
        fn load(&mut self) -> u32 {
            if let Some(storage) = Self::storage() {
                if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                    if let Ok(record) = serde_json::from_str::<BestScoreRecord>(&json) {
                        log::info!("Loaded best score {}", record.best_score);
                        return record.best_score;
                    }
                }
            }

            log::info!("No best score found, starting fresh");
            0
        }

        fn save(&mut self, best_score: u32) {
            if let Some(storage) = Self::storage() {
                if let Ok(json) = serde_json::to_string(&BestScoreRecord { best_score }) {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("LocalStorage rejected best score");
                    } else {
                        log::info!("Best score {} saved", best_score);
                    }
                }
            }
        }
    }
}

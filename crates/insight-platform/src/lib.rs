//! Browser implementations of the `insight-core` ports.
//!
//! - [`engine`]: HTTP analysis engine plus an offline fallback
//! - [`storage`]: IndexedDB and in-memory key-value stores
//! - [`clock`]: wall clock and timers backed by the browser

pub mod clock;
pub mod engine;
pub mod storage;


pub use clock::BrowserClock;
pub use engine::{engine_from_config, HttpAnalysisEngine, OfflineEngine};
pub use storage::{auto_detect_storage, open_storage, IndexedDbStorage, MemoryStorage};

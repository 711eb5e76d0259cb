//! Storage backend selection.
//!
//! `Auto` prefers IndexedDB (persistent) and falls back to memory.

use std::rc::Rc;
use insight_core::ports::StoragePort;
use insight_types::{Result, config::StorageBackendType};
use super::{IndexedDbStorage, MemoryStorage};

/// Try to open the best available storage backend.
/// Never fails: a missing IndexedDB degrades to memory.
pub async fn auto_detect_storage() -> Result<Rc<dyn StoragePort>> {
    match IndexedDbStorage::open().await {
        Ok(idb) => {
            log::info!("Storage backend: IndexedDB");
            Ok(Rc::new(idb))
        }
        Err(e) => {
            log::warn!("IndexedDB unavailable ({}), falling back to memory", e);
            Ok(Rc::new(MemoryStorage::new()))
        }
    }
}

/// Open the backend named in the configuration.
/// An explicit `IndexedDb` choice surfaces its error instead of falling back.
pub async fn open_storage(backend: &StorageBackendType) -> Result<Rc<dyn StoragePort>> {
    match backend {
        StorageBackendType::Auto => auto_detect_storage().await,
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Ok(Rc::new(MemoryStorage::new()))
        }
        StorageBackendType::IndexedDb => {
            let idb = IndexedDbStorage::open().await?;
            log::info!("Storage backend: IndexedDB");
            Ok(Rc::new(idb))
        }
    }
}

//! Persisted configuration, stored as JSON under `insight:config`.

use insight_core::ports::StoragePort;
use insight_types::{config::InsightConfig, Result};

pub const CONFIG_STORAGE_KEY: &str = "insight:config";

/// Stored configuration, or `None` when nothing usable is stored.
/// An unreadable blob is logged and treated as absent.
pub async fn load_config(storage: &dyn StoragePort) -> Result<Option<InsightConfig>> {
    let Some(data) = storage.get(CONFIG_STORAGE_KEY).await? else {
        return Ok(None);
    };
    match serde_json::from_slice::<InsightConfig>(&data) {
        Ok(config) => {
            log::info!("Config restored from {}", storage.backend_name());
            Ok(Some(config))
        }
        Err(e) => {
            log::warn!("Ignoring unreadable stored config: {}", e);
            Ok(None)
        }
    }
}

pub async fn save_config(storage: &dyn StoragePort, config: &InsightConfig) -> Result<()> {
    let json = serde_json::to_vec(config)?;
    storage.set(CONFIG_STORAGE_KEY, &json).await?;
    log::info!("Config saved to {}", storage.backend_name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config_store::*;
    use futures::executor::block_on;
    use insight_core::ports::StoragePort;
    use insight_platform::storage::MemoryStorage;
    use insight_types::brand::BrandId;
    use insight_types::config::{InsightConfig, StorageBackendType};

    #[test]
    fn test_load_config_missing() {
        let storage = MemoryStorage::new();
        assert_eq!(block_on(load_config(&storage)).unwrap(), None);
    }

    #[test]
    fn test_config_save_and_restore() {
        let storage = MemoryStorage::new();
        let mut config = InsightConfig::default();
        config.engine.endpoint = Some("https://analysis.example.com".to_string());
        config.engine.timeout_ms = 45_000;
        config.default_brand = Some(BrandId::parse("QLOLA").unwrap());
        config.storage.backend = StorageBackendType::Memory;

        block_on(save_config(&storage, &config)).unwrap();
        assert!(block_on(storage.exists(CONFIG_STORAGE_KEY)).unwrap());
        assert_eq!(block_on(load_config(&storage)).unwrap(), Some(config));
    }

    #[test]
    fn test_load_config_unreadable_is_absent() {
        let storage = MemoryStorage::new();
        block_on(storage.set(CONFIG_STORAGE_KEY, b"not json")).unwrap();
        assert_eq!(block_on(load_config(&storage)).unwrap(), None);
    }

    #[test]
    fn test_load_config_partial_uses_defaults() {
        let storage = MemoryStorage::new();
        block_on(storage.set(CONFIG_STORAGE_KEY, br#"{"default_brand":"KPR"}"#)).unwrap();
        let config = block_on(load_config(&storage)).unwrap().unwrap();
        assert_eq!(config.default_brand, Some(BrandId::parse("KPR").unwrap()));
        assert_eq!(config.engine.timeout_ms, 30_000);
        assert_eq!(config.brands.len(), 13);
    }
}

use serde::{Deserialize, Serialize};
use crate::brand::BrandId;

/// Top-level assistant configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub engine: EngineConfig,
    pub storage: StorageConfig,
    /// Brand the assistant opens against when none is picked explicitly
    pub default_brand: Option<BrandId>,
    /// Brands offered in the brand picker
    pub brands: Vec<BrandId>,
    /// Quick prompts shown while a session is still empty
    pub starter_prompts: Vec<String>,
    /// Maximum length of an archived session title, in characters
    pub title_max_chars: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            storage: StorageConfig::default(),
            default_brand: None,
            brands: default_brands(),
            starter_prompts: DEFAULT_STARTER_PROMPTS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            title_max_chars: 60,
        }
    }
}

impl InsightConfig {
    /// The default brand if it is still part of the catalog
    pub fn resolved_default_brand(&self) -> Option<BrandId> {
        self.default_brand
            .as_ref()
            .filter(|b| self.brands.contains(b))
            .cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the analysis service; `None` runs offline
    pub endpoint: Option<String>,
    pub api_key: String,
    pub timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: String::new(),
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    Auto,
    Memory,
    IndexedDb,
}

const DEFAULT_BRANDS: &[&str] = &[
    "Agen Brilink",
    "BRIguna",
    "BRImo",
    "Ceria",
    "Debit BRI",
    "Kartu Kredit",
    "KPR",
    "Layanan BRI",
    "Merchant",
    "BRI Prioritas",
    "QLOLA",
    "Tabungan",
    "WMG",
];

const DEFAULT_STARTER_PROMPTS: &[&str] = &[
    "Show me the most effective channel for Engagement",
    "Which CPL is the cheapest?",
    "Show me the most engaged demographic",
];

fn default_brands() -> Vec<BrandId> {
    DEFAULT_BRANDS
        .iter()
        .filter_map(|b| BrandId::parse(b).ok())
        .collect()
}

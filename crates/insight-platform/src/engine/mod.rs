pub mod http;
pub mod offline;

pub use http::HttpAnalysisEngine;
pub use offline::OfflineEngine;

use std::rc::Rc;
use insight_core::ports::AnalysisEnginePort;
use insight_types::config::EngineConfig;

/// Pick the engine for the current configuration: HTTP when an endpoint
/// is set, the offline engine otherwise.
pub fn engine_from_config(config: &EngineConfig) -> Rc<dyn AnalysisEnginePort> {
    match config.endpoint.as_deref().map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => {
            log::info!("Analysis engine: HTTP at {}", endpoint);
            Rc::new(HttpAnalysisEngine::new(config.clone()))
        }
        _ => {
            log::info!("Analysis engine: offline (no endpoint configured)");
            Rc::new(OfflineEngine)
        }
    }
}

//! Engine used when no analysis endpoint is configured.
//! Every turn fails right away so the panel shows an error instead of
//! a spinner that never ends.

use async_trait::async_trait;

use insight_core::ports::{AnalysisEnginePort, AnalysisRequest};
use insight_types::{InsightError, Result, analysis::AnalysisResult};

pub const OFFLINE_MESSAGE: &str =
    "No analysis engine configured. Set an endpoint in Settings to ask questions.";

pub struct OfflineEngine;

#[async_trait(?Send)]
impl AnalysisEnginePort for OfflineEngine {
    async fn ask(&self, req: AnalysisRequest) -> Result<AnalysisResult> {
        log::debug!("Offline engine rejecting prompt for {}", req.brand);
        Err(InsightError::Config(OFFLINE_MESSAGE.to_string()))
    }

    fn engine_name(&self) -> &str {
        "offline"
    }
}

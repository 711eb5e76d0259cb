//! HTTP analysis engine adapter.
//!
//! POSTs the turn as JSON to `{endpoint}/v1/analyze` and expects a
//! camelCase `AnalysisResult` back. Uses browser `fetch()` via gloo-net
//! for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;

use insight_core::ports::{AnalysisEnginePort, AnalysisRequest};
use insight_types::{
    InsightError, Result,
    analysis::AnalysisResult,
    config::EngineConfig,
};

pub struct HttpAnalysisEngine {
    config: EngineConfig,
    url: String,
}

impl HttpAnalysisEngine {
    pub fn new(config: EngineConfig) -> Self {
        let url = analyze_url(config.endpoint.as_deref().unwrap_or_default());
        Self { config, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// `{endpoint}/v1/analyze`, tolerating a trailing slash on the endpoint.
pub fn analyze_url(endpoint: &str) -> String {
    format!("{}/v1/analyze", endpoint.trim().trim_end_matches('/'))
}

/// Decode a response body into an `AnalysisResult`.
pub fn parse_analysis(body: &str) -> Result<AnalysisResult> {
    serde_json::from_str(body)
        .map_err(|e| InsightError::Engine(format!("malformed analysis result: {}", e)))
}

#[async_trait(?Send)]
impl AnalysisEnginePort for HttpAnalysisEngine {
    async fn ask(&self, req: AnalysisRequest) -> Result<AnalysisResult> {
        let mut builder = Request::post(&self.url).header("Content-Type", "application/json");
        if !self.config.api_key.is_empty() {
            builder = builder.header("Authorization", &format!("Bearer {}", self.config.api_key));
        }

        let response = builder
            .json(&req)
            .map_err(|e| InsightError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(InsightError::Engine(format!("HTTP {}: {}", status, text)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;
        parse_analysis(&body)
    }

    fn engine_name(&self) -> &str {
        "http"
    }
}

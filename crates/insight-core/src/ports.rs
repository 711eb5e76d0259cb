//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `insight-core` (pure Rust).
//! Implementations live in `insight-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use insight_types::{
    Result,
    analysis::AnalysisResult,
    brand::BrandId,
    entry::ConversationEntry,
};

// ─── Analysis Engine Port ────────────────────────────────────

/// Request sent to the analysis engine for one turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub prompt: String,
    pub brand: BrandId,
    /// Entries of the session before this turn
    pub prior_turns: Vec<ConversationEntry>,
}

#[async_trait(?Send)]
pub trait AnalysisEnginePort {
    /// Answer a prompt in the context of a brand and the prior conversation.
    async fn ask(&self, req: AnalysisRequest) -> Result<AnalysisResult>;

    /// Name of this engine (for logging/debug)
    fn engine_name(&self) -> &str;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// List keys with a given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Clock Port ──────────────────────────────────────────────

#[async_trait(?Send)]
pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;

    /// Resolve after `ms` milliseconds
    async fn sleep(&self, ms: u64);
}

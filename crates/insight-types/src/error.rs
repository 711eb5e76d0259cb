use thiserror::Error;

use crate::session::SessionHandle;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    #[error("No brand selected: choose a brand before opening the assistant")]
    InvalidBrand,

    #[error("Session {0} is closed")]
    SessionClosed(SessionHandle),

    #[error("Unknown session {0}")]
    UnknownSession(SessionHandle),

    #[error("Analysis engine error: {0}")]
    Engine(String),

    #[error("Session has no completed answer to archive")]
    EmptySession,

    #[error("Cannot archive while a question is being analyzed")]
    TurnInFlight,

    #[error("Archived session not found: {0}")]
    NotFound(String),

    #[error("Invalid conversation transition: {0}")]
    InvalidTransition(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for InsightError {
    fn from(e: serde_json::Error) -> Self {
        InsightError::Serialization(e.to_string())
    }
}

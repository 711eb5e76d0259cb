use serde::{Deserialize, Serialize};
use crate::brand::BrandId;
use crate::session::SessionHandle;

/// Events emitted by the session controller and archive.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new empty session was opened
    Opened { handle: SessionHandle, brand: BrandId },

    /// A prompt was accepted and the engine call started
    TurnStarted { handle: SessionHandle, turn: u64 },

    /// The pending entry was replaced with an answer or a failure
    TurnResolved { handle: SessionHandle, turn: u64, status: TurnStatus },

    /// A late engine result was dropped
    TurnDiscarded { handle: SessionHandle, turn: u64 },

    /// The session was discarded
    Closed { handle: SessionHandle },

    /// A session was written to the history archive
    Archived { id: String, title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    Answered,
    Failed,
}

impl SessionEvent {
    /// The live session this event concerns, if any
    pub fn handle(&self) -> Option<SessionHandle> {
        match self {
            SessionEvent::Opened { handle, .. }
            | SessionEvent::TurnStarted { handle, .. }
            | SessionEvent::TurnResolved { handle, .. }
            | SessionEvent::TurnDiscarded { handle, .. }
            | SessionEvent::Closed { handle } => Some(*handle),
            SessionEvent::Archived { .. } => None,
        }
    }
}

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::brand::BrandId;
use crate::entry::{AssistantPayload, ConversationEntry};
use crate::{InsightError, Result};

/// Handle to a live session held by the session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle(pub u64);

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered conversation log scoped to one brand.
///
/// Entries only change through [`Session::begin_turn`] and
/// [`Session::resolve_turn`], which keep the log alternating
/// user/assistant with at most one trailing pending entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    brand: BrandId,
    started_at: DateTime<Utc>,
    entries: Vec<ConversationEntry>,
}

impl Session {
    pub fn new(brand: BrandId, started_at: DateTime<Utc>) -> Self {
        Self {
            brand,
            started_at,
            entries: Vec::new(),
        }
    }

    pub fn brand(&self) -> &BrandId {
        &self.brand
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.entries.last().is_some_and(ConversationEntry::is_pending)
    }

    /// True once at least one assistant turn has resolved
    pub fn has_completed_turn(&self) -> bool {
        self.entries.iter().any(ConversationEntry::is_completed)
    }

    /// Number of user prompts submitted so far
    pub fn turn_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, ConversationEntry::User { .. }))
            .count()
    }

    pub fn first_prompt(&self) -> Option<&str> {
        self.entries.iter().find_map(ConversationEntry::prompt)
    }

    /// Append a user prompt followed by a pending assistant entry.
    pub fn begin_turn(&mut self, prompt: impl Into<String>) -> Result<()> {
        if self.has_pending() {
            return Err(InsightError::InvalidTransition(
                "a turn is already in flight".to_string(),
            ));
        }
        self.entries.push(ConversationEntry::user(prompt));
        self.entries.push(ConversationEntry::pending());
        Ok(())
    }

    /// Replace the trailing pending entry with a resolved payload.
    pub fn resolve_turn(&mut self, payload: AssistantPayload) -> Result<()> {
        if matches!(payload, AssistantPayload::Pending) {
            return Err(InsightError::InvalidTransition(
                "cannot resolve a turn to pending".to_string(),
            ));
        }
        match self.entries.last_mut() {
            Some(last) if last.is_pending() => {
                *last = ConversationEntry::Assistant { payload };
                Ok(())
            }
            _ => Err(InsightError::InvalidTransition(
                "no pending turn to resolve".to_string(),
            )),
        }
    }
}

/// An archived, immutable copy of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSession {
    pub id: String,
    pub title: String,
    pub archived_at: DateTime<Utc>,
    pub session: Session,
}

impl HistoricalSession {
    /// Snapshot `session` under a fresh id
    pub fn new(session: &Session, title: String, archived_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            archived_at,
            session: session.clone(),
        }
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            id: self.id.clone(),
            title: self.title.clone(),
            brand: self.session.brand().clone(),
            archived_at: self.archived_at,
            turn_count: self.session.turn_count(),
        }
    }
}

/// Summary of an archived session for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub id: String,
    pub title: String,
    pub brand: BrandId,
    pub archived_at: DateTime<Utc>,
    pub turn_count: usize,
}

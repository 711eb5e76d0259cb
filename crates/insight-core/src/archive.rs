//! History archive: durable copies of finished sessions.
//!
//! Records are stored as JSON blobs through [`StoragePort`]:
//!   history:<uuid> → HistoricalSession
//!
//! The id is assigned before the first await of `save`, so two panels
//! saving at the same time never share an id.

use std::rc::Rc;
use insight_types::{
    InsightError, Result,
    event::SessionEvent,
    session::{HistoricalSession, HistorySummary, Session},
};

use crate::event_bus::EventBus;
use crate::ports::{ClockPort, StoragePort};

pub const HISTORY_PREFIX: &str = "history:";
pub const DEFAULT_TITLE_MAX_CHARS: usize = 60;
const UNTITLED: &str = "Untitled conversation";
const ELLIPSIS: &str = "...";

pub struct HistoryArchive {
    storage: Rc<dyn StoragePort>,
    clock: Rc<dyn ClockPort>,
    event_bus: EventBus,
    title_max_chars: usize,
}

impl HistoryArchive {
    pub fn new(storage: Rc<dyn StoragePort>, clock: Rc<dyn ClockPort>, event_bus: EventBus) -> Self {
        Self {
            storage,
            clock,
            event_bus,
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
        }
    }

    pub fn with_title_max_chars(mut self, max_chars: usize) -> Self {
        self.title_max_chars = max_chars;
        self
    }

    pub fn backend_name(&self) -> &str {
        self.storage.backend_name()
    }

    /// Persist a snapshot of `session`.
    ///
    /// Fails with `EmptySession` until at least one assistant turn has
    /// resolved, and with `TurnInFlight` while a turn is still pending.
    pub async fn save(&self, session: &Session) -> Result<HistoricalSession> {
        if !session.has_completed_turn() {
            return Err(InsightError::EmptySession);
        }
        if session.has_pending() {
            return Err(InsightError::TurnInFlight);
        }

        let title = derive_title(session, self.title_max_chars);
        let record = HistoricalSession::new(session, title, self.clock.now());
        let blob = serde_json::to_vec(&record)?;
        self.storage.set(&record_key(&record.id), &blob).await?;

        log::info!(
            "Archived session {} \"{}\" ({})",
            record.id,
            record.title,
            self.storage.backend_name()
        );
        self.event_bus.emit(SessionEvent::Archived {
            id: record.id.clone(),
            title: record.title.clone(),
        });
        Ok(record)
    }

    /// Summaries of every archived session, newest first.
    pub async fn list(&self) -> Result<Vec<HistorySummary>> {
        let keys = self.storage.list_keys(HISTORY_PREFIX).await?;

        let mut summaries = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(blob) = self.storage.get(&key).await? else {
                continue;
            };
            match serde_json::from_slice::<HistoricalSession>(&blob) {
                Ok(record) => summaries.push(record.summary()),
                Err(e) => log::warn!("Skipping unreadable archive entry {}: {}", key, e),
            }
        }

        summaries.sort_by(|a, b| {
            b.archived_at
                .cmp(&a.archived_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(summaries)
    }

    pub async fn get(&self, id: &str) -> Result<HistoricalSession> {
        let blob = self
            .storage
            .get(&record_key(id))
            .await?
            .ok_or_else(|| InsightError::NotFound(id.to_string()))?;
        Ok(serde_json::from_slice(&blob)?)
    }
}

fn record_key(id: &str) -> String {
    format!("{}{}", HISTORY_PREFIX, id)
}

/// Listing label: the first prompt with whitespace collapsed, cut to
/// `max_chars` characters including the trailing ellipsis.
pub fn derive_title(session: &Session, max_chars: usize) -> String {
    let collapsed = session
        .first_prompt()
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());
    truncate_chars(&collapsed, max_chars)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return text.chars().take(max_chars).collect();
    }
    let keep = max_chars - ELLIPSIS.len();
    let head: String = text.chars().take(keep).collect();
    format!("{}{}", head.trim_end(), ELLIPSIS)
}

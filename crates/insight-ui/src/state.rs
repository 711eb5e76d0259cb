//! UI-level state that drives rendering.
//! A read-only projection of the controller and archive, updated each
//! frame by draining the EventBus and re-projecting the active session
//! when its revision moved.

use insight_core::controller::{SessionController, SessionState};
use insight_core::suggestions::starter_prompts;
use insight_types::{
    brand::BrandId,
    config::InsightConfig,
    event::{SessionEvent, TurnStatus},
    session::{HistoricalSession, HistorySummary, SessionHandle},
};

use crate::projection::{project, project_archived, RenderModel, RenderRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Assistant,
    ChatLogs,
    Settings,
}

/// State visible to UI panels
pub struct UiState {
    pub view: View,
    /// Brand picked in the assistant's brand selector
    pub brand_choice: Option<BrandId>,
    /// Session shown in the assistant panel
    pub active: Option<SessionHandle>,
    /// Projection of the active session
    pub model: Option<RenderModel>,
    /// Starter prompts while the active session is empty
    pub starters: Vec<String>,
    projected_at: Option<(SessionHandle, u64)>,
    /// Input field content
    pub input_text: String,
    /// Status line text
    pub status_text: String,
    /// Summaries for the chat logs view, newest first
    pub history: Vec<HistorySummary>,
    /// The list needs reloading from the archive
    pub history_stale: bool,
    /// Archived session open in the chat logs detail pane
    pub selected: Option<SelectedHistory>,
}

pub struct SelectedHistory {
    pub id: String,
    pub title: String,
    pub model: RenderModel,
}

impl UiState {
    pub fn new(config: &InsightConfig) -> Self {
        Self {
            view: View::Assistant,
            brand_choice: config.resolved_default_brand(),
            active: None,
            model: None,
            starters: Vec::new(),
            projected_at: None,
            input_text: String::new(),
            status_text: "Ready".to_string(),
            history: Vec::new(),
            history_stale: true,
            selected: None,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            let ours = event.handle().is_some() && event.handle() == self.active;
            match event {
                SessionEvent::Opened { handle, brand } => {
                    self.active = Some(handle);
                    self.projected_at = None;
                    self.status_text = format!("Asking about {}", brand);
                }
                SessionEvent::TurnStarted { .. } if ours => {
                    self.status_text = "Analyzing...".to_string();
                }
                SessionEvent::TurnResolved { status, .. } if ours => {
                    self.status_text = match status {
                        TurnStatus::Answered => "Ready".to_string(),
                        TurnStatus::Failed => "Last question failed".to_string(),
                    };
                }
                SessionEvent::Closed { .. } if ours => {
                    self.active = None;
                    self.model = None;
                    self.starters.clear();
                    self.projected_at = None;
                    self.status_text = "Ready".to_string();
                }
                SessionEvent::Archived { title, .. } => {
                    self.history_stale = true;
                    self.status_text = format!("Saved to chat logs: {}", title);
                }
                _ => {}
            }
        }
    }

    /// Re-project the active session if it changed since the last call.
    /// Returns whether the model was rebuilt.
    pub fn refresh(&mut self, controller: &SessionController, config: &InsightConfig) -> bool {
        let Some(handle) = self.active else {
            return false;
        };
        let revision = match controller.revision(handle) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("Dropping stale session {}: {}", handle, e);
                self.active = None;
                self.model = None;
                self.projected_at = None;
                return true;
            }
        };
        if self.projected_at == Some((handle, revision)) {
            return false;
        }
        match controller.session(handle) {
            Ok(session) => {
                self.model = Some(project(&session));
                self.starters = starter_prompts(config, &session);
                self.projected_at = Some((handle, revision));
                true
            }
            Err(e) => {
                log::warn!("Cannot project session {}: {}", handle, e);
                false
            }
        }
    }

    pub fn set_history(&mut self, history: Vec<HistorySummary>) {
        self.history = history;
        self.history_stale = false;
    }

    pub fn show_archived(&mut self, record: &HistoricalSession) {
        self.selected = Some(SelectedHistory {
            id: record.id.clone(),
            title: record.title.clone(),
            model: project_archived(record),
        });
    }

    /// Assistant state as seen through the projection
    pub fn session_state(&self) -> Option<SessionState> {
        self.active?;
        Some(match &self.model {
            None => SessionState::Empty,
            Some(m) if !m.accepts_input => SessionState::Processing,
            Some(m) if m.rows.is_empty() => SessionState::Empty,
            Some(_) => SessionState::AwaitingInput,
        })
    }

    pub fn is_busy(&self) -> bool {
        self.session_state() == Some(SessionState::Processing)
    }

    /// Archiving needs at least one resolved answer or failure
    pub fn can_archive(&self) -> bool {
        self.model.as_ref().is_some_and(|m| {
            m.accepts_input
                && m.rows.iter().any(|r| !matches!(r, RenderRow::UserBubble { .. }))
        })
    }
}

use serde::{Deserialize, Serialize};
use crate::analysis::AnalysisResult;

/// Who produced an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single turn in a conversation.
///
/// A user entry always carries a prompt; an assistant entry carries
/// exactly one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sender", rename_all = "lowercase")]
pub enum ConversationEntry {
    User { prompt: String },
    Assistant { payload: AssistantPayload },
}

/// What the assistant has to say for a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AssistantPayload {
    /// The engine call is still in flight
    Pending,
    Answer { result: AnalysisResult },
    Failure { message: String },
}

impl ConversationEntry {
    pub fn user(prompt: impl Into<String>) -> Self {
        ConversationEntry::User { prompt: prompt.into() }
    }

    pub fn pending() -> Self {
        ConversationEntry::Assistant { payload: AssistantPayload::Pending }
    }

    pub fn answer(result: AnalysisResult) -> Self {
        ConversationEntry::Assistant {
            payload: AssistantPayload::Answer { result },
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ConversationEntry::Assistant {
            payload: AssistantPayload::Failure { message: message.into() },
        }
    }

    pub fn sender(&self) -> Sender {
        match self {
            ConversationEntry::User { .. } => Sender::User,
            ConversationEntry::Assistant { .. } => Sender::Assistant,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            ConversationEntry::Assistant { payload: AssistantPayload::Pending }
        )
    }

    /// True for an assistant entry that has resolved (answer or failure)
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            ConversationEntry::Assistant {
                payload: AssistantPayload::Answer { .. } | AssistantPayload::Failure { .. }
            }
        )
    }

    pub fn prompt(&self) -> Option<&str> {
        match self {
            ConversationEntry::User { prompt } => Some(prompt),
            _ => None,
        }
    }

    pub fn answer_result(&self) -> Option<&AnalysisResult> {
        match self {
            ConversationEntry::Assistant {
                payload: AssistantPayload::Answer { result },
            } => Some(result),
            _ => None,
        }
    }
}

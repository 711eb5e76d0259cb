//! Session → RenderModel projection.
//!
//! The only surface panels read from. Projection is pure: the same
//! session always yields an equal model, and the session is never
//! touched. `UiState` caches the model per (handle, revision).

use insight_core::suggestions::suggestions_for;
use insight_types::{
    analysis::{cell_text, AnalysisResult, SupportingRow},
    entry::{AssistantPayload, ConversationEntry},
    session::{HistoricalSession, Session},
};

pub const ERROR_TITLE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub brand: String,
    pub rows: Vec<RenderRow>,
    pub accepts_input: bool,
    /// Archived copy: rendered for review only
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderRow {
    UserBubble { text: String },
    Loading,
    AnswerCard(AnswerCard),
    ErrorPanel { title: String, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerCard {
    pub summary: String,
    pub key_finding: KeyFindingView,
    pub table: Option<TableView>,
    pub recommendations: Vec<RecommendationView>,
    /// Empty in read-only models
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyFindingView {
    pub title: String,
    pub value: String,
    pub change: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationView {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<Column>,
    /// One cell per column, in column order
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub label: String,
}

/// Project a live session.
pub fn project(session: &Session) -> RenderModel {
    RenderModel {
        brand: session.brand().to_string(),
        rows: project_entries(session.entries(), true),
        accepts_input: !session.has_pending(),
        read_only: false,
    }
}

/// Project an archived session for review. Nothing in the result is
/// clickable.
pub fn project_archived(record: &HistoricalSession) -> RenderModel {
    RenderModel {
        brand: record.session.brand().to_string(),
        rows: project_entries(record.session.entries(), false),
        accepts_input: false,
        read_only: true,
    }
}

fn project_entries(entries: &[ConversationEntry], interactive: bool) -> Vec<RenderRow> {
    entries
        .iter()
        .map(|entry| match entry {
            ConversationEntry::User { prompt } => RenderRow::UserBubble {
                text: prompt.clone(),
            },
            ConversationEntry::Assistant { payload } => match payload {
                AssistantPayload::Pending => RenderRow::Loading,
                AssistantPayload::Answer { result } => {
                    RenderRow::AnswerCard(answer_card(result, interactive))
                }
                AssistantPayload::Failure { message } => RenderRow::ErrorPanel {
                    title: ERROR_TITLE.to_string(),
                    message: message.clone(),
                },
            },
        })
        .collect()
}

fn answer_card(result: &AnalysisResult, interactive: bool) -> AnswerCard {
    AnswerCard {
        summary: result.summary.clone(),
        key_finding: KeyFindingView {
            title: result.key_finding.title.clone(),
            value: result.key_finding.value.clone(),
            change: result.key_finding.change.clone(),
        },
        table: build_table(&result.supporting_rows),
        recommendations: result
            .recommendations
            .iter()
            .map(|r| RecommendationView {
                title: r.title.clone(),
                description: r.description.clone(),
            })
            .collect(),
        suggestions: if interactive {
            suggestions_for(result)
        } else {
            Vec::new()
        },
    }
}

/// Header is the union of row keys in first-seen order; cells missing
/// from a row come out empty. `None` when there are no rows.
pub fn build_table(rows: &[SupportingRow]) -> Option<TableView> {
    if rows.is_empty() {
        return None;
    }

    let mut keys: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
    }

    let cells = rows
        .iter()
        .map(|row| {
            keys.iter()
                .map(|k| row.get(*k).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Some(TableView {
        columns: keys
            .iter()
            .map(|k| Column {
                key: k.to_string(),
                label: humanize_label(k),
            })
            .collect(),
        rows: cells,
    })
}

/// Split camelCase words: `avgTime` → `avg Time`. Acronyms and other
/// text pass through unchanged.
pub fn humanize_label(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;
    for c in key.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase()) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

//! Follow-up prompts offered as quick-submit buttons.

use insight_types::{
    analysis::AnalysisResult,
    config::InsightConfig,
    session::Session,
};

/// The engine's own follow-ups. No fallback is synthesised: an answer
/// without suggestions simply offers none.
pub fn suggestions_for(result: &AnalysisResult) -> Vec<String> {
    result.follow_up_suggestions.clone()
}

/// Suggestions of the session's last entry, if that entry is an answer.
pub fn latest_suggestions(session: &Session) -> Vec<String> {
    session
        .entries()
        .last()
        .and_then(|e| e.answer_result())
        .map(suggestions_for)
        .unwrap_or_default()
}

/// Configured starter prompts, offered only before the first turn.
pub fn starter_prompts(config: &InsightConfig, session: &Session) -> Vec<String> {
    if !session.is_empty() {
        return Vec::new();
    }
    config
        .starter_prompts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .cloned()
        .collect()
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of tabular evidence. Key order is display order.
pub type SupportingRow = Map<String, Value>;

/// A successful answer from the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub key_finding: KeyFinding,
    #[serde(default)]
    pub supporting_rows: Vec<SupportingRow>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub follow_up_suggestions: Vec<String>,
}

/// The single highlighted metric of an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFinding {
    pub title: String,
    pub value: String,
    pub change: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
}

/// Render a cell value for display. Strings are shown as-is,
/// everything else as its JSON text.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

use serde::{Deserialize, Serialize};

/// Input control used to collect an answer for a question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Two-way choice rendered as buttons, answered with one of `choices`.
    Boolean,
    /// Free-form text input.
    Text,
    /// Single selection from `choices`.
    Select,
}

/// One questionnaire entry from the catalog.
///
/// Questions are defined once at process start and never mutated. `choices`
/// is populated for `boolean` and `select` kinds and empty for `text`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A hardcoded conditional follow-up: when the answer recorded for
/// `trigger_id` equals `trigger_value`, `question` is appended to the set.
#[derive(Debug, Clone)]
pub struct FollowUpRule {
    pub trigger_id: &'static str,
    pub trigger_value: &'static str,
    pub question: Question,
}

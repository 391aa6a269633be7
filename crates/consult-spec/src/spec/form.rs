use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::QuestionSpec;

fn default_submit_label() -> String {
    "Submit".to_string()
}

/// Top-level questionnaire definition: an ordered list of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionnaireSpec {
    pub id: String,
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
    pub questions: Vec<QuestionSpec>,
}

impl QuestionnaireSpec {
    /// Looks up a top-level question by id.
    pub fn question(&self, id: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|question| question.id == id)
    }
}

/// Dotted path addressing a sub-field of a group question.
pub fn field_path(group_id: &str, field_id: &str) -> String {
    format!("{}.{}", group_id, field_id)
}

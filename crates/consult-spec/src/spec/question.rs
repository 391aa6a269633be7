use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single question of the questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Closed set of question kinds. Each variant carries only what it renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Dropdown with a neutral leading option.
    Select { options: Vec<String> },
    /// Independent toggles, one per option.
    Checkbox { options: Vec<String> },
    /// Free multi-line text.
    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// Mutually exclusive choices sharing the question id as group name.
    Radio { options: Vec<String> },
    /// Several single-line inputs under one label.
    Group { fields: Vec<GroupField> },
}

/// Discriminant of [`QuestionKind`], used where the payload is irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    Select,
    Checkbox,
    Textarea,
    Radio,
    Group,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Select => "select",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Textarea => "textarea",
            QuestionType::Radio => "radio",
            QuestionType::Group => "group",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-line input nested inside a group question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GroupField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub input_type: InputType,
    #[serde(default)]
    pub required: bool,
}

/// Text-like input flavours a group field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Email,
    Tel,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Tel => "tel",
        }
    }
}

impl QuestionSpec {
    pub fn question_type(&self) -> QuestionType {
        match self.kind {
            QuestionKind::Select { .. } => QuestionType::Select,
            QuestionKind::Checkbox { .. } => QuestionType::Checkbox,
            QuestionKind::Textarea { .. } => QuestionType::Textarea,
            QuestionKind::Radio { .. } => QuestionType::Radio,
            QuestionKind::Group { .. } => QuestionType::Group,
        }
    }

    /// Choice strings for select, checkbox and radio; empty otherwise.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Select { options }
            | QuestionKind::Checkbox { options }
            | QuestionKind::Radio { options } => options,
            QuestionKind::Textarea { .. } | QuestionKind::Group { .. } => &[],
        }
    }

    /// Nested inputs of a group question; empty otherwise.
    pub fn fields(&self) -> &[GroupField] {
        match &self.kind {
            QuestionKind::Group { fields } => fields,
            _ => &[],
        }
    }
}

//! Transient state of the rendered controls.
//!
//! A [`FormState`] lives only as long as the questionnaire is on screen. It
//! starts with every control unset or empty and is never written anywhere.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::spec::{QuestionKind, QuestionSpec, QuestionType, QuestionnaireSpec, form::field_path};

/// Failures when addressing a control that does not exist or does not fit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("question '{id}' is a {actual} question, not {expected}")]
    KindMismatch {
        id: String,
        expected: QuestionType,
        actual: QuestionType,
    },
    #[error("'{option}' is not an option of question '{id}'")]
    UnknownOption { id: String, option: String },
    #[error("group '{group}' has no field '{field}'")]
    UnknownField { group: String, field: String },
    #[error("answer for '{id}' must be {expected}")]
    InvalidAnswer { id: String, expected: &'static str },
    #[error("answers must be a JSON object")]
    NotAnObject,
}

impl StateError {
    /// Stable machine-readable code used in validation reports.
    pub fn code(&self) -> &'static str {
        match self {
            StateError::UnknownQuestion(_) => "unknown_question",
            StateError::KindMismatch { .. } | StateError::InvalidAnswer { .. } => "type_mismatch",
            StateError::UnknownOption { .. } => "unknown_option",
            StateError::UnknownField { .. } => "unknown_field",
            StateError::NotAnObject => "not_an_object",
        }
    }

    /// Dotted path of the offending control, when there is one.
    pub fn path(&self) -> Option<String> {
        match self {
            StateError::UnknownQuestion(id)
            | StateError::KindMismatch { id, .. }
            | StateError::UnknownOption { id, .. }
            | StateError::InvalidAnswer { id, .. } => Some(id.clone()),
            StateError::UnknownField { group, field } => Some(field_path(group, field)),
            StateError::NotAnObject => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ControlState {
    Select(Option<usize>),
    Checkbox(Vec<bool>),
    Radio(Option<usize>),
    Text(String),
    Group(Vec<String>),
}

impl ControlState {
    fn initial(question: &QuestionSpec) -> Self {
        match &question.kind {
            QuestionKind::Select { .. } => ControlState::Select(None),
            QuestionKind::Checkbox { options } => ControlState::Checkbox(vec![false; options.len()]),
            QuestionKind::Textarea { .. } => ControlState::Text(String::new()),
            QuestionKind::Radio { .. } => ControlState::Radio(None),
            QuestionKind::Group { fields } => ControlState::Group(vec![String::new(); fields.len()]),
        }
    }
}

/// In-memory values of every control, index-aligned with the questions.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<'a> {
    spec: &'a QuestionnaireSpec,
    controls: Vec<ControlState>,
}

impl<'a> FormState<'a> {
    pub fn new(spec: &'a QuestionnaireSpec) -> Self {
        let controls = spec.questions.iter().map(ControlState::initial).collect();
        Self { spec, controls }
    }

    /// Builds state from an answers document, failing on the first bad entry.
    pub fn from_answers(spec: &'a QuestionnaireSpec, answers: &Value) -> Result<Self, StateError> {
        let map = answers.as_object().ok_or(StateError::NotAnObject)?;
        let mut state = Self::new(spec);
        for (id, value) in map {
            state.apply_answer(id, value)?;
        }
        Ok(state)
    }

    pub fn spec(&self) -> &'a QuestionnaireSpec {
        self.spec
    }

    /// Returns every control to its initial unset/empty value.
    pub fn reset(&mut self) {
        self.controls = self.spec.questions.iter().map(ControlState::initial).collect();
    }

    fn locate(&self, id: &str, expected: QuestionType) -> Result<usize, StateError> {
        let index = self
            .spec
            .questions
            .iter()
            .position(|question| question.id == id)
            .ok_or_else(|| StateError::UnknownQuestion(id.to_string()))?;
        let actual = self.spec.questions[index].question_type();
        if actual != expected {
            return Err(StateError::KindMismatch {
                id: id.to_string(),
                expected,
                actual,
            });
        }
        Ok(index)
    }

    fn option_index(&self, index: usize, option: &str) -> Result<usize, StateError> {
        let question = &self.spec.questions[index];
        question
            .options()
            .iter()
            .position(|candidate| candidate == option)
            .ok_or_else(|| StateError::UnknownOption {
                id: question.id.clone(),
                option: option.to_string(),
            })
    }

    fn field_index(&self, index: usize, field: &str) -> Result<usize, StateError> {
        let question = &self.spec.questions[index];
        question
            .fields()
            .iter()
            .position(|candidate| candidate.id == field)
            .ok_or_else(|| StateError::UnknownField {
                group: question.id.clone(),
                field: field.to_string(),
            })
    }

    /// Picks a dropdown entry; `None` or `""` returns to the neutral option.
    pub fn select(&mut self, id: &str, option: Option<&str>) -> Result<(), StateError> {
        let index = self.locate(id, QuestionType::Select)?;
        let selection = match option.filter(|value| !value.is_empty()) {
            Some(option) => Some(self.option_index(index, option)?),
            None => None,
        };
        self.controls[index] = ControlState::Select(selection);
        Ok(())
    }

    /// Flips one checkbox and returns its new value.
    pub fn toggle(&mut self, id: &str, option: &str) -> Result<bool, StateError> {
        let checked = !self.is_checked(id, option)?;
        self.set_checked(id, option, checked)?;
        Ok(checked)
    }

    pub fn set_checked(&mut self, id: &str, option: &str, checked: bool) -> Result<(), StateError> {
        let index = self.locate(id, QuestionType::Checkbox)?;
        let slot = self.option_index(index, option)?;
        if let ControlState::Checkbox(flags) = &mut self.controls[index] {
            flags[slot] = checked;
        }
        Ok(())
    }

    /// Selects a radio choice, clearing whichever choice was selected before.
    pub fn choose(&mut self, id: &str, option: &str) -> Result<(), StateError> {
        let index = self.locate(id, QuestionType::Radio)?;
        let slot = self.option_index(index, option)?;
        self.controls[index] = ControlState::Radio(Some(slot));
        Ok(())
    }

    /// Returns a radio group to having nothing chosen.
    pub fn clear_choice(&mut self, id: &str) -> Result<(), StateError> {
        let index = self.locate(id, QuestionType::Radio)?;
        self.controls[index] = ControlState::Radio(None);
        Ok(())
    }

    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> Result<(), StateError> {
        let index = self.locate(id, QuestionType::Textarea)?;
        self.controls[index] = ControlState::Text(text.into());
        Ok(())
    }

    pub fn set_field(
        &mut self,
        group: &str,
        field: &str,
        text: impl Into<String>,
    ) -> Result<(), StateError> {
        let index = self.locate(group, QuestionType::Group)?;
        let slot = self.field_index(index, field)?;
        if let ControlState::Group(values) = &mut self.controls[index] {
            values[slot] = text.into();
        }
        Ok(())
    }

    pub fn selected(&self, id: &str) -> Result<Option<&'a str>, StateError> {
        let index = self.locate(id, QuestionType::Select)?;
        Ok(self.choice_at(index))
    }

    pub fn is_checked(&self, id: &str, option: &str) -> Result<bool, StateError> {
        let index = self.locate(id, QuestionType::Checkbox)?;
        let slot = self.option_index(index, option)?;
        Ok(match &self.controls[index] {
            ControlState::Checkbox(flags) => flags[slot],
            _ => false,
        })
    }

    /// Checked options, in declaration order.
    pub fn checked(&self, id: &str) -> Result<Vec<&'a str>, StateError> {
        let index = self.locate(id, QuestionType::Checkbox)?;
        Ok(self.checked_at(index))
    }

    pub fn chosen(&self, id: &str) -> Result<Option<&'a str>, StateError> {
        let index = self.locate(id, QuestionType::Radio)?;
        Ok(self.choice_at(index))
    }

    pub fn text(&self, id: &str) -> Result<&str, StateError> {
        let index = self.locate(id, QuestionType::Textarea)?;
        Ok(self.text_at(index))
    }

    pub fn field(&self, group: &str, field: &str) -> Result<&str, StateError> {
        let index = self.locate(group, QuestionType::Group)?;
        let slot = self.field_index(index, field)?;
        Ok(self.field_at(index, slot))
    }

    pub(crate) fn choice_at(&self, index: usize) -> Option<&'a str> {
        let spec = self.spec;
        let options = spec.questions[index].options();
        match self.controls[index] {
            ControlState::Select(Some(slot)) | ControlState::Radio(Some(slot)) => {
                options.get(slot).map(String::as_str)
            }
            _ => None,
        }
    }

    pub(crate) fn checked_at(&self, index: usize) -> Vec<&'a str> {
        let spec = self.spec;
        let options = spec.questions[index].options();
        match &self.controls[index] {
            ControlState::Checkbox(flags) => options
                .iter()
                .zip(flags)
                .filter(|(_, checked)| **checked)
                .map(|(option, _)| option.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn text_at(&self, index: usize) -> &str {
        match &self.controls[index] {
            ControlState::Text(text) => text,
            _ => "",
        }
    }

    pub(crate) fn field_at(&self, index: usize, slot: usize) -> &str {
        match &self.controls[index] {
            ControlState::Group(values) => values.get(slot).map(String::as_str).unwrap_or(""),
            _ => "",
        }
    }

    /// Applies one entry of an answers document to the matching control.
    ///
    /// Multi-valued entries apply every part that fits and report the first
    /// part that does not.
    pub fn apply_answer(&mut self, id: &str, value: &Value) -> Result<(), StateError> {
        let spec = self.spec;
        let question = spec
            .question(id)
            .ok_or_else(|| StateError::UnknownQuestion(id.to_string()))?;
        let invalid = |expected| StateError::InvalidAnswer {
            id: id.to_string(),
            expected,
        };

        match &question.kind {
            QuestionKind::Select { .. } => match value {
                Value::Null => self.select(id, None),
                Value::String(option) => self.select(id, Some(option.as_str())),
                _ => Err(invalid("a string or null")),
            },
            QuestionKind::Radio { .. } => match value {
                Value::Null => self.clear_choice(id),
                Value::String(option) => self.choose(id, option),
                _ => Err(invalid("a string or null")),
            },
            QuestionKind::Checkbox { .. } => {
                let entries = value.as_array().ok_or_else(|| invalid("an array of strings"))?;
                let mut first_error = None;
                for entry in entries {
                    let outcome = match entry.as_str() {
                        Some(option) => self.set_checked(id, option, true),
                        None => Err(invalid("an array of strings")),
                    };
                    if let Err(error) = outcome {
                        first_error.get_or_insert(error);
                    }
                }
                first_error.map_or(Ok(()), Err)
            }
            QuestionKind::Textarea { .. } => {
                let text = value.as_str().ok_or_else(|| invalid("a string"))?;
                self.set_text(id, text)
            }
            QuestionKind::Group { .. } => {
                let entries = value
                    .as_object()
                    .ok_or_else(|| invalid("an object of strings"))?;
                let mut first_error = None;
                for (field, entry) in entries {
                    let outcome = match entry.as_str() {
                        Some(text) => self.set_field(id, field, text),
                        None => Err(invalid("an object of strings")),
                    };
                    if let Err(error) = outcome {
                        first_error.get_or_insert(error);
                    }
                }
                first_error.map_or(Ok(()), Err)
            }
        }
    }

    /// Current values as a JSON answers document keyed by question id.
    pub fn to_answers(&self) -> Value {
        let mut map = Map::new();
        for (index, question) in self.spec.questions.iter().enumerate() {
            let value = match &question.kind {
                QuestionKind::Select { .. } | QuestionKind::Radio { .. } => self
                    .choice_at(index)
                    .map(|choice| Value::String(choice.to_string()))
                    .unwrap_or(Value::Null),
                QuestionKind::Checkbox { .. } => Value::Array(
                    self.checked_at(index)
                        .into_iter()
                        .map(|option| Value::String(option.to_string()))
                        .collect(),
                ),
                QuestionKind::Textarea { .. } => Value::String(self.text_at(index).to_string()),
                QuestionKind::Group { fields } => Value::Object(
                    fields
                        .iter()
                        .enumerate()
                        .map(|(slot, field)| {
                            (
                                field.id.clone(),
                                Value::String(self.field_at(index, slot).to_string()),
                            )
                        })
                        .collect(),
                ),
            };
            map.insert(question.id.clone(), value);
        }
        Value::Object(map)
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::spec::{QuestionnaireSpec, form::field_path};
use crate::state::{FormState, StateError};

/// A single problem found in an answers document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
    pub code: String,
}

impl From<&StateError> for ValidationError {
    fn from(error: &StateError) -> Self {
        ValidationError {
            path: error.path(),
            message: error.to_string(),
            code: error.code().to_string(),
        }
    }
}

/// Outcome of checking whether a questionnaire may be submitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_required: Vec<String>,
}

/// Required-presence check on group fields. Nothing else blocks submission.
///
/// A field counts as filled as soon as it holds any character, whitespace
/// included, which is how native `required` inputs behave.
pub fn validate(state: &FormState<'_>) -> ValidationResult {
    let missing_required = missing_required(state);
    ValidationResult {
        valid: missing_required.is_empty(),
        errors: Vec::new(),
        missing_required,
    }
}

/// Validates an answers document against the questionnaire.
///
/// Every entry is applied to a fresh [`FormState`]; entries that do not fit
/// are reported rather than aborting, then required fields are checked on
/// whatever did apply.
pub fn validate_answers(spec: &QuestionnaireSpec, answers: &Value) -> ValidationResult {
    let mut state = FormState::new(spec);
    let Some(map) = answers.as_object() else {
        return ValidationResult {
            valid: false,
            errors: vec![ValidationError::from(&StateError::NotAnObject)],
            missing_required: missing_required(&state),
        };
    };

    let errors = map
        .iter()
        .filter_map(|(id, value)| state.apply_answer(id, value).err())
        .map(|error| ValidationError::from(&error))
        .collect::<Vec<_>>();
    let missing_required = missing_required(&state);

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty(),
        errors,
        missing_required,
    }
}

fn missing_required(state: &FormState<'_>) -> Vec<String> {
    let spec = state.spec();
    let mut missing = Vec::new();
    for (index, question) in spec.questions.iter().enumerate() {
        for (slot, field) in question.fields().iter().enumerate() {
            if field.required && state.field_at(index, slot).is_empty() {
                missing.push(field_path(&question.id, &field.id));
            }
        }
    }
    missing
}

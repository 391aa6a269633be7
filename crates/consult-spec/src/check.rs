use std::collections::BTreeSet;

use thiserror::Error;

use crate::spec::{QuestionKind, QuestionnaireSpec};

/// Structural problems in a questionnaire definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("questionnaire '{0}' has no questions")]
    NoQuestions(String),
    #[error("identifier '{0}' must be non-empty and must not contain '.'")]
    InvalidId(String),
    #[error("identifier '{0}' is used more than once")]
    DuplicateId(String),
    #[error("question '{0}' needs at least one option")]
    MissingOptions(String),
    #[error("question '{question}' lists option '{option}' more than once")]
    DuplicateOption { question: String, option: String },
    #[error("group question '{0}' needs at least one field")]
    MissingFields(String),
}

/// Checks the invariants every questionnaire must hold before it is rendered.
///
/// Identifiers share one namespace: a group field may not reuse the id of a
/// question or of a field in any group.
pub fn check_spec(spec: &QuestionnaireSpec) -> Result<(), SpecError> {
    if spec.questions.is_empty() {
        return Err(SpecError::NoQuestions(spec.id.clone()));
    }

    let mut seen = BTreeSet::new();
    for question in &spec.questions {
        check_id(&question.id)?;
        if !seen.insert(question.id.clone()) {
            return Err(SpecError::DuplicateId(question.id.clone()));
        }

        match &question.kind {
            QuestionKind::Select { options }
            | QuestionKind::Checkbox { options }
            | QuestionKind::Radio { options } => {
                if options.is_empty() {
                    return Err(SpecError::MissingOptions(question.id.clone()));
                }
                let mut distinct = BTreeSet::new();
                for option in options {
                    if !distinct.insert(option.as_str()) {
                        return Err(SpecError::DuplicateOption {
                            question: question.id.clone(),
                            option: option.clone(),
                        });
                    }
                }
            }
            QuestionKind::Textarea { .. } => {}
            QuestionKind::Group { fields } => {
                if fields.is_empty() {
                    return Err(SpecError::MissingFields(question.id.clone()));
                }
                for field in fields {
                    check_id(&field.id)?;
                    if !seen.insert(field.id.clone()) {
                        return Err(SpecError::DuplicateId(field.id.clone()));
                    }
                }
            }
        }
    }

    Ok(())
}

fn check_id(id: &str) -> Result<(), SpecError> {
    if id.is_empty() || id.contains('.') {
        Err(SpecError::InvalidId(id.to_string()))
    } else {
        Ok(())
    }
}

//! The questionnaire shipped with the site.

use std::sync::LazyLock;

use crate::spec::{GroupField, InputType, QuestionKind, QuestionSpec, QuestionnaireSpec};

pub const CONSULTATION_FORM_ID: &str = "consultation";

static CONSULTATION: LazyLock<QuestionnaireSpec> = LazyLock::new(build_consultation);

/// The consultation questionnaire, built once and never mutated.
pub fn consultation() -> &'static QuestionnaireSpec {
    &CONSULTATION
}

fn options(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn required_field(id: &str, label: &str, input_type: InputType) -> GroupField {
    GroupField {
        id: id.into(),
        label: label.into(),
        input_type,
        required: true,
    }
}

fn build_consultation() -> QuestionnaireSpec {
    QuestionnaireSpec {
        id: CONSULTATION_FORM_ID.into(),
        title: "Consultation Questionnaire".into(),
        version: "1.0.0".into(),
        description: None,
        submit_label: "Submit Consultation Request".into(),
        questions: vec![
            QuestionSpec {
                id: "frequency".into(),
                label: "How often would you like your home cleaned?".into(),
                kind: QuestionKind::Select {
                    options: options(&["Weekly", "Bi-weekly", "Monthly", "One-time deep clean"]),
                },
            },
            QuestionSpec {
                id: "sqft".into(),
                label: "What is the approximate square footage of your home?".into(),
                kind: QuestionKind::Select {
                    options: options(&[
                        "Under 1,000 sq ft",
                        "1,000-2,000 sq ft",
                        "2,000-3,000 sq ft",
                        "Over 3,000 sq ft",
                    ]),
                },
            },
            QuestionSpec {
                id: "priorities".into(),
                label: "What are your top cleaning priorities?".into(),
                kind: QuestionKind::Checkbox {
                    options: options(&[
                        "Deep cleaning bathrooms",
                        "Kitchen sanitization",
                        "Dusting and allergen removal",
                        "Floor care",
                        "Window cleaning",
                        "Organization",
                    ]),
                },
            },
            QuestionSpec {
                id: "pain_points".into(),
                label: "What are your current cleaning pain points?".into(),
                kind: QuestionKind::Textarea {
                    placeholder: Some(
                        "Tell us about your specific cleaning challenges...".into(),
                    ),
                },
            },
            QuestionSpec {
                id: "pets".into(),
                label: "Do you have any pets?".into(),
                kind: QuestionKind::Radio {
                    options: options(&["Yes", "No"]),
                },
            },
            QuestionSpec {
                id: "contact".into(),
                label: "Your Contact Information".into(),
                kind: QuestionKind::Group {
                    fields: vec![
                        required_field("name", "Name", InputType::Text),
                        required_field("email", "Email", InputType::Email),
                        required_field("phone", "Phone", InputType::Tel),
                    ],
                },
            },
        ],
    }
}

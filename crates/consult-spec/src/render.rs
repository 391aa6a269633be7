use serde_json::{Map, Value, json};

use crate::spec::{InputType, QuestionKind, QuestionType, form::field_path};
use crate::state::FormState;
use crate::template::{QUESTIONNAIRE_TEMPLATE, TemplateEngine, TemplateError};
use crate::validate::validate;

/// Label of the neutral first entry of every dropdown.
pub const PLACEHOLDER_OPTION_LABEL: &str = "Select an option";
/// Visible height of free-text controls.
pub const TEXTAREA_ROWS: u8 = 4;

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// At least one required field is empty; submit is blocked.
    NeedInput,
    /// Submit would be accepted.
    Ready,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Ready => "ready",
        }
    }
}

/// One entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One checkbox or radio button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub name: String,
    pub value: String,
    pub checked: bool,
}

/// Single-line input of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub name: String,
    pub label: String,
    pub input_type: InputType,
    pub required: bool,
    pub value: String,
}

/// Controls rendered for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Select {
        name: String,
        options: Vec<ChoiceOption>,
    },
    Checkboxes(Vec<Toggle>),
    Radios {
        group: String,
        choices: Vec<Toggle>,
    },
    TextArea {
        name: String,
        rows: u8,
        placeholder: Option<String>,
        value: String,
    },
    Fields(Vec<TextInput>),
}

impl Control {
    /// Number of interactive elements the user can operate.
    pub fn len(&self) -> usize {
        match self {
            Control::Select { .. } | Control::TextArea { .. } => 1,
            Control::Checkboxes(toggles) => toggles.len(),
            Control::Radios { choices, .. } => choices.len(),
            Control::Fields(inputs) => inputs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A labelled question and its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderGroup {
    pub id: String,
    pub label: String,
    pub kind: QuestionType,
    pub control: Control,
}

/// Collected payload used by the text, JSON and HTML renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub form_id: String,
    pub form_title: String,
    pub submit_label: String,
    pub status: RenderStatus,
    pub missing_required: Vec<String>,
    pub groups: Vec<RenderGroup>,
}

/// Build the renderer payload from the current control state, in question order.
pub fn build_render_payload(state: &FormState<'_>) -> RenderPayload {
    let spec = state.spec();
    let groups = spec
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let control = match &question.kind {
                QuestionKind::Select { options } => {
                    let selected = state.choice_at(index);
                    let mut entries = vec![ChoiceOption {
                        value: String::new(),
                        label: PLACEHOLDER_OPTION_LABEL.to_string(),
                        selected: false,
                    }];
                    entries.extend(options.iter().map(|option| ChoiceOption {
                        value: option.clone(),
                        label: option.clone(),
                        selected: selected == Some(option.as_str()),
                    }));
                    Control::Select {
                        name: question.id.clone(),
                        options: entries,
                    }
                }
                QuestionKind::Checkbox { options } => {
                    let checked = state.checked_at(index);
                    Control::Checkboxes(
                        options
                            .iter()
                            .map(|option| Toggle {
                                name: question.id.clone(),
                                value: option.clone(),
                                checked: checked.contains(&option.as_str()),
                            })
                            .collect(),
                    )
                }
                QuestionKind::Radio { options } => {
                    let chosen = state.choice_at(index);
                    Control::Radios {
                        group: question.id.clone(),
                        choices: options
                            .iter()
                            .map(|option| Toggle {
                                name: question.id.clone(),
                                value: option.clone(),
                                checked: chosen == Some(option.as_str()),
                            })
                            .collect(),
                    }
                }
                QuestionKind::Textarea { placeholder } => Control::TextArea {
                    name: question.id.clone(),
                    rows: TEXTAREA_ROWS,
                    placeholder: placeholder.clone(),
                    value: state.text_at(index).to_string(),
                },
                QuestionKind::Group { fields } => Control::Fields(
                    fields
                        .iter()
                        .enumerate()
                        .map(|(slot, field)| TextInput {
                            name: field_path(&question.id, &field.id),
                            label: field.label.clone(),
                            input_type: field.input_type,
                            required: field.required,
                            value: state.field_at(index, slot).to_string(),
                        })
                        .collect(),
                ),
            };
            RenderGroup {
                id: question.id.clone(),
                label: question.label.clone(),
                kind: question.question_type(),
                control,
            }
        })
        .collect();

    let validation = validate(state);
    let status = if validation.valid {
        RenderStatus::Ready
    } else {
        RenderStatus::NeedInput
    };

    RenderPayload {
        form_id: spec.id.clone(),
        form_title: spec.title.clone(),
        submit_label: spec.submit_label.clone(),
        status,
        missing_required: validation.missing_required,
        groups,
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let groups = payload
        .groups
        .iter()
        .map(|group| {
            json!({
                "id": group.id,
                "label": group.label,
                "type": group.kind.as_str(),
                "control": control_json(&group.control),
            })
        })
        .collect::<Vec<_>>();

    json!({
        "form_id": payload.form_id,
        "form_title": payload.form_title,
        "submit_label": payload.submit_label,
        "status": payload.status.as_str(),
        "missing_required": payload.missing_required,
        "groups": groups,
    })
}

fn control_json(control: &Control) -> Value {
    match control {
        Control::Select { name, options } => json!({
            "kind": "select",
            "name": name,
            "options": options.iter().map(|option| json!({
                "value": option.value,
                "label": option.label,
                "selected": option.selected,
            })).collect::<Vec<_>>(),
        }),
        Control::Checkboxes(toggles) => json!({
            "kind": "checkboxes",
            "toggles": toggles.iter().map(toggle_json).collect::<Vec<_>>(),
        }),
        Control::Radios { group, choices } => json!({
            "kind": "radios",
            "group_name": group,
            "toggles": choices.iter().map(toggle_json).collect::<Vec<_>>(),
        }),
        Control::TextArea {
            name,
            rows,
            placeholder,
            value,
        } => json!({
            "kind": "textarea",
            "name": name,
            "rows": rows,
            "placeholder": placeholder,
            "value": value,
        }),
        Control::Fields(inputs) => json!({
            "kind": "fields",
            "fields": inputs.iter().map(|input| json!({
                "name": input.name,
                "label": input.label,
                "input_type": input.input_type.as_str(),
                "required": input.required,
                "value": input.value,
            })).collect::<Vec<_>>(),
        }),
    }
}

fn toggle_json(toggle: &Toggle) -> Value {
    json!({
        "name": toggle.name,
        "value": toggle.value,
        "label": toggle.value,
        "checked": toggle.checked,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {} ({})", payload.form_title, payload.form_id));
    if payload.missing_required.is_empty() {
        lines.push(format!("Status: {}", payload.status.as_str()));
    } else {
        lines.push(format!(
            "Status: {} (missing: {})",
            payload.status.as_str(),
            payload.missing_required.join(", ")
        ));
    }

    for (position, group) in payload.groups.iter().enumerate() {
        lines.push(format!("{}. {} [{}]", position + 1, group.label, group.id));
        match &group.control {
            Control::Select { options, .. } => {
                let current = options
                    .iter()
                    .find(|option| option.selected)
                    .map(|option| option.label.as_str())
                    .unwrap_or("(none)");
                let choices = options
                    .iter()
                    .skip(1)
                    .map(|option| option.label.as_str())
                    .collect::<Vec<_>>();
                lines.push(format!("   Choices: {}", choices.join(" | ")));
                lines.push(format!("   Selected: {}", current));
            }
            Control::Checkboxes(toggles) => {
                for toggle in toggles {
                    let mark = if toggle.checked { "x" } else { " " };
                    lines.push(format!("   [{}] {}", mark, toggle.value));
                }
            }
            Control::Radios { choices, .. } => {
                for choice in choices {
                    let mark = if choice.checked { "o" } else { " " };
                    lines.push(format!("   ({}) {}", mark, choice.value));
                }
            }
            Control::TextArea {
                placeholder, value, ..
            } => {
                if !value.is_empty() {
                    lines.push(format!("   > {}", value));
                } else if let Some(placeholder) = placeholder {
                    lines.push(format!("   > ({})", placeholder));
                } else {
                    lines.push("   >".to_string());
                }
            }
            Control::Fields(inputs) => {
                for input in inputs {
                    let marker = if input.required { " *" } else { "" };
                    lines.push(format!(
                        "   {}{} <{}>: {}",
                        input.label,
                        marker,
                        input.input_type.as_str(),
                        input.value
                    ));
                }
            }
        }
    }

    lines.push(format!("[{}]", payload.submit_label));
    lines.join("\n")
}

/// View model consumed by the questionnaire template.
pub(crate) fn html_view(payload: &RenderPayload, visible: bool) -> Value {
    let groups = payload
        .groups
        .iter()
        .map(|group| {
            let mut view = Map::new();
            view.insert("id".into(), Value::String(group.id.clone()));
            view.insert("label".into(), Value::String(group.label.clone()));
            view.insert("type".into(), Value::String(group.kind.as_str().into()));
            view.insert(group.kind.as_str().into(), Value::Bool(true));
            match control_json(&group.control) {
                Value::Object(control) => {
                    for (key, value) in control {
                        if key != "kind" {
                            view.insert(key, value);
                        }
                    }
                }
                other => {
                    view.insert("control".into(), other);
                }
            }
            Value::Object(view)
        })
        .collect::<Vec<_>>();

    json!({
        "visible": visible,
        "form_id": payload.form_id,
        "form_title": payload.form_title,
        "submit_label": payload.submit_label,
        "groups": groups,
    })
}

/// Render the payload as the questionnaire's HTML markup. Text is escaped.
pub fn render_html(payload: &RenderPayload) -> Result<String, TemplateError> {
    let engine = TemplateEngine::new()?;
    engine.render(QUESTIONNAIRE_TEMPLATE, &html_view(payload, true))
}

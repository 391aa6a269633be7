use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use consult_spec::{
    DiscardSubmission, FormState, QuestionnaireSpec, RenderPayload, SpecError, StateError,
    SubmitOutcome, TemplateError, answers_schema, build_render_payload, check_spec, consultation,
    render_html as qa_render_html, render_json_ui as qa_render_json_ui,
    render_text as qa_render_text, spec_schema, submit, validate_answers as qa_validate_answers,
};

#[derive(Debug, Error)]
enum ComponentError {
    #[error("failed to parse config/{0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("failed to parse answers: {0}")]
    AnswersParse(#[source] serde_json::Error),
    #[error("form '{0}' is not available")]
    FormUnavailable(String),
    #[error("invalid questionnaire: {0}")]
    InvalidSpec(#[from] SpecError),
    #[error("invalid answers: {0}")]
    Answers(#[from] StateError),
    #[error("json encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
    #[error("render failed: {0}")]
    Render(#[from] TemplateError),
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct ComponentConfig {
    #[serde(default)]
    form_spec_json: Option<String>,
}

/// Questionnaire in effect: the built-in catalog, or the config override.
enum LoadedSpec {
    BuiltIn(&'static QuestionnaireSpec),
    Custom(QuestionnaireSpec),
}

impl LoadedSpec {
    fn spec(&self) -> &QuestionnaireSpec {
        match self {
            LoadedSpec::BuiltIn(spec) => spec,
            LoadedSpec::Custom(spec) => spec,
        }
    }
}

fn load_form_spec(config_json: &str) -> Result<LoadedSpec, ComponentError> {
    let config = if config_json.trim().is_empty() {
        ComponentConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(ComponentError::ConfigParse)?
    };

    match config.form_spec_json {
        Some(spec_json) => {
            let spec: QuestionnaireSpec =
                serde_json::from_str(&spec_json).map_err(ComponentError::ConfigParse)?;
            check_spec(&spec)?;
            debug!(form_id = %spec.id, "loaded questionnaire from config");
            Ok(LoadedSpec::Custom(spec))
        }
        None => Ok(LoadedSpec::BuiltIn(consultation())),
    }
}

fn ensure_form(form_id: &str, config_json: &str) -> Result<LoadedSpec, ComponentError> {
    let loaded = load_form_spec(config_json)?;
    if loaded.spec().id != form_id {
        Err(ComponentError::FormUnavailable(form_id.to_string()))
    } else {
        Ok(loaded)
    }
}

fn parse_answers(answers_json: &str) -> Result<Value, ComponentError> {
    serde_json::from_str(answers_json).map_err(ComponentError::AnswersParse)
}

fn respond(result: Result<Value, ComponentError>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|error| {
            json!({"error": format!("json encode: {}", error)}).to_string()
        }),
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

fn respond_string(result: Result<String, ComponentError>) -> String {
    match result {
        Ok(value) => value,
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

pub fn describe(form_id: &str, config_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|loaded| {
        serde_json::to_value(loaded.spec()).map_err(ComponentError::JsonEncode)
    }))
}

pub fn get_spec_schema() -> String {
    respond(spec_schema().map_err(ComponentError::JsonEncode))
}

pub fn get_answer_schema(form_id: &str, config_json: &str) -> String {
    respond(ensure_form(form_id, config_json).map(|loaded| answers_schema(loaded.spec())))
}

pub fn validate_answers(form_id: &str, config_json: &str, answers_json: &str) -> String {
    let validation = ensure_form(form_id, config_json).and_then(|loaded| {
        let answers = parse_answers(answers_json)?;
        serde_json::to_value(qa_validate_answers(loaded.spec(), &answers))
            .map_err(ComponentError::JsonEncode)
    });
    respond(validation)
}

fn with_payload<T>(
    form_id: &str,
    config_json: &str,
    answers_json: &str,
    render: impl FnOnce(&RenderPayload) -> Result<T, ComponentError>,
) -> Result<T, ComponentError> {
    let loaded = ensure_form(form_id, config_json)?;
    let answers = parse_answers(answers_json)?;
    let state = FormState::from_answers(loaded.spec(), &answers)?;
    render(&build_render_payload(&state))
}

pub fn render_text(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond_string(with_payload(form_id, config_json, answers_json, |payload| {
        Ok(qa_render_text(payload))
    }))
}

pub fn render_json_ui(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(with_payload(form_id, config_json, answers_json, |payload| {
        Ok(qa_render_json_ui(payload))
    }))
}

pub fn render_html(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond_string(with_payload(form_id, config_json, answers_json, |payload| {
        Ok(qa_render_html(payload)?)
    }))
}

/// Intercepts a submit. Accepted answers are discarded and never echoed.
pub fn submit_all(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|loaded| {
        let answers = parse_answers(answers_json)?;
        let state = FormState::from_answers(loaded.spec(), &answers)?;
        let outcome = submit(&state, &mut DiscardSubmission);
        let mut response = json!({
            "status": outcome.as_str(),
            "persisted": false,
        });
        if let SubmitOutcome::Blocked { missing_required } = outcome {
            response["missing_required"] = json!(missing_required);
        }
        Ok(response)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_answers() -> Value {
        json!({
            "frequency": "Weekly",
            "priorities": ["Floor care"],
            "pets": "No",
            "contact": { "name": "Ada", "email": "ada@example.com", "phone": "555-0100" }
        })
    }

    #[test]
    fn describe_returns_spec_json() {
        let payload = describe("consultation", "");
        let spec: Value = serde_json::from_str(&payload).expect("valid json");
        assert_eq!(spec["id"], "consultation");
        assert_eq!(spec["questions"][5]["type"], "group");
    }

    #[test]
    fn describe_rejects_other_forms() {
        let payload = describe("newsletter", "");
        let parsed: Value = serde_json::from_str(&payload).expect("json");
        assert_eq!(parsed["error"], "form 'newsletter' is not available");
    }

    #[test]
    fn config_override_is_checked() {
        let spec = json!({
            "id": "broken",
            "title": "Broken",
            "version": "1.0",
            "questions": [
                { "id": "q1", "label": "Pick", "type": "radio", "options": [] }
            ]
        });
        let config = json!({ "form_spec_json": spec.to_string() });
        let payload = describe("broken", &config.to_string());
        let parsed: Value = serde_json::from_str(&payload).expect("json");
        assert!(
            parsed["error"]
                .as_str()
                .unwrap_or_default()
                .contains("needs at least one option")
        );
    }

    #[test]
    fn config_override_replaces_catalog() {
        let spec = json!({
            "id": "callback",
            "title": "Callback",
            "version": "1.0",
            "questions": [
                { "id": "when", "label": "When?", "type": "select", "options": ["AM", "PM"] }
            ]
        });
        let config = json!({ "form_spec_json": spec.to_string() });
        let payload = render_json_ui("callback", &config.to_string(), "{}");
        let parsed: Value = serde_json::from_str(&payload).expect("json");
        assert_eq!(parsed["status"], "ready");
        assert_eq!(parsed["submit_label"], "Submit");
        assert_eq!(parsed["groups"][0]["control"]["options"][2]["value"], "PM");
    }

    #[test]
    fn spec_schema_is_json_schema() {
        let schema: Value = serde_json::from_str(&get_spec_schema()).expect("json");
        assert!(schema.get("properties").is_some());
    }

    #[test]
    fn answer_schema_matches_questions() {
        let schema = get_answer_schema("consultation", "");
        let value: Value = serde_json::from_str(&schema).expect("json");
        assert!(
            value["properties"]
                .as_object()
                .unwrap()
                .contains_key("pain_points")
        );
    }

    #[test]
    fn validate_answers_reports_valid_when_complete() {
        let result = validate_answers("consultation", "", &complete_answers().to_string());
        let parsed: Value = serde_json::from_str(&result).expect("json");
        assert!(parsed["valid"].as_bool().unwrap_or(false));
    }

    #[test]
    fn validate_answers_rejects_malformed_json() {
        let result = validate_answers("consultation", "", "{not json");
        let parsed: Value = serde_json::from_str(&result).expect("json");
        assert!(
            parsed["error"]
                .as_str()
                .unwrap_or_default()
                .starts_with("failed to parse answers")
        );
    }

    #[test]
    fn render_calls_reject_malformed_answers() {
        for output in [
            render_html("consultation", "", "{not json"),
            render_text("consultation", "", "{not json"),
            render_json_ui("consultation", "", "{not json"),
        ] {
            let parsed: Value = serde_json::from_str(&output).expect("json");
            assert!(
                parsed["error"]
                    .as_str()
                    .unwrap_or_default()
                    .starts_with("failed to parse answers")
            );
            assert!(!output.contains("<form"));
        }
    }

    #[test]
    fn submit_all_rejects_truncated_answers() {
        let response = submit_all("consultation", "", r#"{"contact": {"name": "Ada""#);
        let parsed: Value = serde_json::from_str(&response).expect("json");
        assert!(parsed.get("status").is_none());
        assert!(
            parsed["error"]
                .as_str()
                .unwrap_or_default()
                .starts_with("failed to parse answers")
        );
    }

    #[test]
    fn render_text_outputs_summary() {
        let output = render_text("consultation", "", "{}");
        assert!(output.contains("Form:"));
        assert!(output.contains("6. Your Contact Information [contact]"));
    }

    #[test]
    fn render_json_ui_reflects_answers() {
        let payload = render_json_ui("consultation", "", r#"{"pets":"Yes"}"#);
        let parsed: Value = serde_json::from_str(&payload).expect("json");
        assert_eq!(parsed["groups"][4]["control"]["toggles"][0]["checked"], true);
        assert_eq!(parsed["groups"][4]["control"]["toggles"][1]["checked"], false);
    }

    #[test]
    fn render_html_reports_bad_answers_as_error() {
        let payload = render_html("consultation", "", r#"{"pets":"Maybe"}"#);
        let parsed: Value = serde_json::from_str(&payload).expect("json");
        assert!(parsed["error"].as_str().unwrap().contains("Maybe"));
    }

    #[test]
    fn render_html_outputs_form_markup() {
        let html = render_html("consultation", "", "{}");
        assert!(html.contains("<form"));
        assert!(html.contains("Consultation Questionnaire"));
    }

    #[test]
    fn submit_all_blocks_on_missing_contact() {
        let answers = json!({ "contact": { "email": "ada@example.com", "phone": "555-0100" } });
        let response = submit_all("consultation", "", &answers.to_string());
        let parsed: Value = serde_json::from_str(&response).expect("json");
        assert_eq!(parsed["status"], "blocked");
        assert_eq!(parsed["missing_required"], json!(["contact.name"]));
    }

    #[test]
    fn submit_all_accepts_without_echoing_answers() {
        let response = submit_all("consultation", "", &complete_answers().to_string());
        let parsed: Value = serde_json::from_str(&response).expect("json");
        assert_eq!(parsed["status"], "accepted");
        assert_eq!(parsed["persisted"], false);
        assert!(parsed.get("answers").is_none());
        assert!(!response.contains("ada@example.com"));
    }
}

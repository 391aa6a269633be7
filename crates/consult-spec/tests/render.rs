use serde_json::json;

use consult_spec::{
    Control, FormState, QuestionnaireSpec, RenderStatus, build_render_payload, consultation,
    render::{PLACEHOLDER_OPTION_LABEL, TEXTAREA_ROWS},
    render_html, render_json_ui, render_text,
};

fn fixture(name: &str) -> &'static str {
    match name {
        "consultation" => include_str!("../tests/fixtures/consultation.form.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

#[test]
fn fixture_matches_built_in_catalog() {
    let spec: QuestionnaireSpec =
        serde_json::from_str(fixture("consultation")).expect("deserialize");
    assert_eq!(&spec, consultation());
}

#[test]
fn groups_follow_question_order() {
    let state = FormState::new(consultation());
    let payload = build_render_payload(&state);
    let ids = payload
        .groups
        .iter()
        .map(|group| group.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        ["frequency", "sqft", "priorities", "pain_points", "pets", "contact"]
    );
}

#[test]
fn select_lists_neutral_option_first_and_nothing_selected() {
    let spec = consultation();
    let state = FormState::new(spec);
    let payload = build_render_payload(&state);

    for (group, question) in payload.groups.iter().zip(&spec.questions) {
        let Control::Select { options, .. } = &group.control else {
            continue;
        };
        let values = options
            .iter()
            .map(|option| option.value.as_str())
            .collect::<Vec<_>>();
        let mut expected = vec![""];
        expected.extend(question.options().iter().map(String::as_str));
        assert_eq!(values, expected);
        assert_eq!(options[0].label, PLACEHOLDER_OPTION_LABEL);
        assert!(options.iter().all(|option| !option.selected));
    }
}

#[test]
fn checkbox_and_radio_render_one_control_per_option() {
    let spec = consultation();
    let state = FormState::new(spec);
    let payload = build_render_payload(&state);

    let priorities = &payload.groups[2];
    assert_eq!(priorities.control.len(), 6);
    let Control::Checkboxes(toggles) = &priorities.control else {
        panic!("priorities should render checkboxes");
    };
    assert!(toggles.iter().all(|toggle| !toggle.checked));

    let pets = &payload.groups[4];
    let Control::Radios { group, choices } = &pets.control else {
        panic!("pets should render radios");
    };
    assert_eq!(group, "pets");
    assert_eq!(choices.len(), 2);
    assert!(choices.iter().all(|choice| choice.name == "pets" && !choice.checked));
}

#[test]
fn textarea_and_group_controls() {
    let state = FormState::new(consultation());
    let payload = build_render_payload(&state);

    let Control::TextArea {
        rows,
        placeholder,
        value,
        ..
    } = &payload.groups[3].control
    else {
        panic!("pain_points should render a textarea");
    };
    assert_eq!(*rows, TEXTAREA_ROWS);
    assert_eq!(
        placeholder.as_deref(),
        Some("Tell us about your specific cleaning challenges...")
    );
    assert!(value.is_empty());

    let Control::Fields(inputs) = &payload.groups[5].control else {
        panic!("contact should render fields");
    };
    let names = inputs
        .iter()
        .map(|input| (input.name.as_str(), input.input_type.as_str(), input.required))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        [
            ("contact.name", "text", true),
            ("contact.email", "email", true),
            ("contact.phone", "tel", true)
        ]
    );
}

#[test]
fn status_tracks_required_fields() {
    let mut state = FormState::new(consultation());
    assert_eq!(build_render_payload(&state).status, RenderStatus::NeedInput);

    state.set_field("contact", "name", "Ada").unwrap();
    state.set_field("contact", "email", "ada@example.com").unwrap();
    state.set_field("contact", "phone", "555-0100").unwrap();
    let payload = build_render_payload(&state);
    assert_eq!(payload.status, RenderStatus::Ready);
    assert!(payload.missing_required.is_empty());
}

#[test]
fn render_text_marks_current_values() {
    let mut state = FormState::new(consultation());
    state.select("frequency", Some("Monthly")).unwrap();
    state.toggle("priorities", "Floor care").unwrap();
    state.choose("pets", "No").unwrap();

    let text = render_text(&build_render_payload(&state));
    assert!(text.contains("Form: Consultation Questionnaire (consultation)"));
    assert!(text.contains("Selected: Monthly"));
    assert!(text.contains("[x] Floor care"));
    assert!(text.contains("[ ] Organization"));
    assert!(text.contains("(o) No"));
    assert!(text.contains("missing: contact.name, contact.email, contact.phone"));
}

#[test]
fn render_json_ui_exposes_structure() {
    let state = FormState::new(consultation());
    let ui = render_json_ui(&build_render_payload(&state));

    assert_eq!(ui["form_id"], "consultation");
    assert_eq!(ui["status"], "need_input");
    let groups = ui["groups"].as_array().expect("groups array");
    assert_eq!(groups.len(), 6);
    assert_eq!(groups[0]["control"]["options"][0], json!({
        "value": "",
        "label": "Select an option",
        "selected": false,
    }));
    assert_eq!(groups[4]["control"]["group_name"], "pets");
    assert_eq!(groups[5]["control"]["fields"][1]["input_type"], "email");
}

#[test]
fn render_html_emits_native_controls() {
    let state = FormState::new(consultation());
    let html = render_html(&build_render_payload(&state)).expect("render html");

    assert!(html.contains(r#"<option value="">Select an option</option>"#));
    assert_eq!(html.matches(r#"type="checkbox" name="priorities""#).count(), 6);
    assert_eq!(html.matches(r#"type="radio" name="pets""#).count(), 2);
    assert!(html.contains(r#"rows="4""#));
    assert!(html.contains(r#"placeholder="Tell us about your specific cleaning challenges...""#));
    assert_eq!(html.matches(" required>").count(), 3);
    assert!(html.contains(r#"type="email" name="contact.email""#));
    assert!(!html.contains(" selected"));
    assert!(!html.contains(" checked"));
    assert!(html.contains(r#"<div class="consult-overlay" data-dismiss="backdrop">"#));
    assert!(html.contains("Submit Consultation Request"));
}

#[test]
fn render_html_escapes_entered_text() {
    let mut state = FormState::new(consultation());
    state
        .set_text("pain_points", "<script>alert(1)</script>")
        .unwrap();
    let html = render_html(&build_render_payload(&state)).expect("render html");
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

use consult_spec::{FormState, HeaderState, PageContext, consultation, landing_page, render_page};

#[test]
fn page_contains_sections_and_hidden_questionnaire() {
    let form = FormState::new(consultation());
    let html = render_page(
        landing_page(),
        &PageContext {
            header: HeaderState::default(),
            form: &form,
            modal_open: false,
            year: 2026,
        },
    )
    .expect("render page");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Elevating your living space with white-glove cleaning services"));
    assert!(html.contains("Fully Insured"));
    assert!(html.contains("A Story of Transformation"));
    assert!(html.contains("Our Premium Services"));
    assert!(html.contains("Experience the Difference"));
    assert!(html.contains("&copy; 2026 The Dragonfly Effect. All rights reserved."));
    assert_eq!(html.matches("icon icon-star").count(), 5);
    assert!(html.contains(r#"data-header-variant="transparent""#));
    assert!(html.contains(r#"<div class="consult-overlay" hidden data-dismiss="backdrop">"#));
    assert!(html.contains("[hidden] { display: none !important; }"));
    assert!(html.contains(r#"querySelectorAll('[data-modal="show"]')"#));
    assert!(html.contains("consult:request-hidden"));
    assert!(html.contains("window.scrollY > 50"));
    assert!(html.contains("Consultation Questionnaire"));
}

#[test]
fn page_reflects_scroll_and_open_modal() {
    let mut header = HeaderState::default();
    header.on_scroll(400.0);
    let mut form = FormState::new(consultation());
    form.choose("pets", "Yes").unwrap();

    let html = render_page(
        landing_page(),
        &PageContext {
            header,
            form: &form,
            modal_open: true,
            year: 2026,
        },
    )
    .expect("render page");

    assert!(html.contains(r#"data-header-variant="solid""#));
    assert!(html.contains(r#"<div class="consult-overlay" data-dismiss="backdrop">"#));
    assert!(html.contains(r#"value="Yes" checked"#));
}

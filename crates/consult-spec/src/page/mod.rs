//! The single marketing page that hosts the questionnaire.

pub mod content;
pub mod header;

use serde_json::{Value, json};

use crate::render::{build_render_payload, html_view};
use crate::state::FormState;
use crate::template::{PAGE_TEMPLATE, TemplateEngine, TemplateError};

pub use content::{LandingPage, landing_page};
pub use header::{HeaderState, HeaderVariant, SCROLL_THRESHOLD};

/// Everything the page template needs besides the static copy.
pub struct PageContext<'s, 'a> {
    pub header: HeaderState,
    /// Questionnaire to embed; hidden unless `modal_open`.
    pub form: &'s FormState<'a>,
    pub modal_open: bool,
    pub year: i32,
}

/// Renders the full HTML document.
pub fn render_page(page: &LandingPage, ctx: &PageContext<'_, '_>) -> Result<String, TemplateError> {
    let engine = TemplateEngine::new()?;
    let payload = build_render_payload(ctx.form);
    let data = json!({
        "page": page,
        "header_variant": ctx.header.variant().as_str(),
        "stars": star_slots(page.testimonial.stars),
        "modal": html_view(&payload, ctx.modal_open),
        "year": ctx.year,
        "scroll_threshold": SCROLL_THRESHOLD,
    });
    engine.render(PAGE_TEMPLATE, &data)
}

fn star_slots(count: u8) -> Value {
    Value::Array((0..count).map(|slot| json!(slot)).collect())
}

use handlebars::{Handlebars, handlebars_helper};
use serde::Serialize;
use thiserror::Error;

pub const QUESTIONNAIRE_TEMPLATE: &str = "questionnaire";
pub const PAGE_TEMPLATE: &str = "page";

const QUESTIONNAIRE_SOURCE: &str = include_str!("../templates/questionnaire.hbs");
const PAGE_SOURCE: &str = include_str!("../templates/page.hbs");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template registration failed: {0}")]
    Register(#[from] handlebars::TemplateError),
    #[error("template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

handlebars_helper!(icon_class: |name: str| format!("icon icon-{}", name));

/// Registers the helpers shared by every template.
pub fn register_default_helpers(handlebars: &mut Handlebars<'_>) {
    handlebars.register_helper("icon_class", Box::new(icon_class));
}

/// Handlebars registry loaded with the questionnaire and page templates.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        register_default_helpers(&mut handlebars);
        handlebars.register_template_string(QUESTIONNAIRE_TEMPLATE, QUESTIONNAIRE_SOURCE)?;
        handlebars.register_partial(QUESTIONNAIRE_TEMPLATE, QUESTIONNAIRE_SOURCE)?;
        handlebars.register_template_string(PAGE_TEMPLATE, PAGE_SOURCE)?;
        Ok(Self { handlebars })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(name, data)?)
    }
}

#![allow(missing_docs)]

pub mod answers_schema;
pub mod catalog;
pub mod check;
pub mod modal;
pub mod page;
pub mod render;
pub mod spec;
pub mod state;
pub mod submit;
pub mod template;
pub mod validate;

pub use answers_schema::{generate as answers_schema, spec_schema};
pub use catalog::{CONSULTATION_FORM_ID, consultation};
pub use check::{SpecError, check_spec};
pub use modal::{ConsultationModal, ModalEvent, ModalSignal, PointerTarget};
pub use page::{HeaderState, HeaderVariant, LandingPage, PageContext, landing_page, render_page};
pub use render::{
    ChoiceOption, Control, RenderGroup, RenderPayload, RenderStatus, TextInput, Toggle,
    build_render_payload, render_html, render_json_ui, render_text,
};
pub use spec::{GroupField, InputType, QuestionKind, QuestionSpec, QuestionType, QuestionnaireSpec};
pub use state::{FormState, StateError};
pub use submit::{DiscardSubmission, SubmissionSink, SubmitOutcome, submit};
pub use template::{TemplateEngine, TemplateError, register_default_helpers};
pub use validate::{ValidationError, ValidationResult, validate, validate_answers};

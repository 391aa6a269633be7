pub mod form;
pub mod question;

pub use form::QuestionnaireSpec;
pub use question::{GroupField, InputType, QuestionKind, QuestionSpec, QuestionType};

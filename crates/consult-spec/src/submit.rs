use serde_json::Value;
use tracing::debug;

use crate::state::FormState;
use crate::validate::validate;

/// Result of intercepting a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required fields are still empty; listed as dotted paths.
    Blocked { missing_required: Vec<String> },
    /// All required fields are filled and the answers went to the sink.
    Accepted,
}

impl SubmitOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitOutcome::Blocked { .. } => "blocked",
            SubmitOutcome::Accepted => "accepted",
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

/// Receives answers once a submission is accepted.
pub trait SubmissionSink {
    fn deliver(&mut self, form_id: &str, answers: &Value);
}

/// Sink that drops the answers: no network call, nothing stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSubmission;

impl SubmissionSink for DiscardSubmission {
    fn deliver(&mut self, form_id: &str, _answers: &Value) {
        debug!(form_id, "submission discarded");
    }
}

/// Runs the required-field check and hands accepted answers to `sink`.
pub fn submit<S: SubmissionSink + ?Sized>(state: &FormState<'_>, sink: &mut S) -> SubmitOutcome {
    let validation = validate(state);
    if !validation.valid {
        debug!(missing = ?validation.missing_required, "submission blocked");
        return SubmitOutcome::Blocked {
            missing_required: validation.missing_required,
        };
    }
    sink.deliver(&state.spec().id, &state.to_answers());
    SubmitOutcome::Accepted
}

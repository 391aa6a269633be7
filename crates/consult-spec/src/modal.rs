//! The overlay hosting the questionnaire.
//!
//! The hosting page drives visibility with [`ModalSignal`]s. The modal never
//! hides itself: the close button and clicks on the backdrop only raise
//! [`ModalEvent::RequestHidden`] for the host to act on.

use tracing::{debug, trace};

use crate::render::{RenderPayload, build_render_payload};
use crate::spec::QuestionnaireSpec;
use crate::state::FormState;
use crate::submit::{DiscardSubmission, SubmissionSink, SubmitOutcome, submit};

/// Signals the host sends to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSignal {
    Show,
    Hide,
}

/// Signals the modal raises to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    RequestHidden,
}

/// Where a pointer press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dimmed area around the surface.
    Backdrop,
    /// Anywhere on the surface itself.
    Surface,
}

pub struct ConsultationModal<'a, S: SubmissionSink = DiscardSubmission> {
    spec: &'a QuestionnaireSpec,
    session: Option<FormState<'a>>,
    sink: S,
}

impl<'a> ConsultationModal<'a, DiscardSubmission> {
    pub fn new(spec: &'a QuestionnaireSpec) -> Self {
        Self::with_sink(spec, DiscardSubmission)
    }
}

impl<'a, S: SubmissionSink> ConsultationModal<'a, S> {
    pub fn with_sink(spec: &'a QuestionnaireSpec, sink: S) -> Self {
        Self {
            spec,
            session: None,
            sink,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn signal(&mut self, signal: ModalSignal) {
        match signal {
            ModalSignal::Show => self.show(),
            ModalSignal::Hide => self.hide(),
        }
    }

    /// Opens with blank controls; a no-op while already open.
    pub fn show(&mut self) {
        if self.session.is_none() {
            debug!(form_id = %self.spec.id, "questionnaire shown");
            self.session = Some(FormState::new(self.spec));
        }
    }

    /// Closes and drops everything entered so far.
    pub fn hide(&mut self) {
        if self.session.take().is_some() {
            debug!(form_id = %self.spec.id, "questionnaire hidden");
        }
    }

    pub fn close_clicked(&self) -> Option<ModalEvent> {
        self.request_hidden()
    }

    pub fn pointer_down(&self, target: PointerTarget) -> Option<ModalEvent> {
        match target {
            PointerTarget::Backdrop => self.request_hidden(),
            PointerTarget::Surface => None,
        }
    }

    fn request_hidden(&self) -> Option<ModalEvent> {
        if self.is_open() {
            trace!(form_id = %self.spec.id, "dismiss requested");
            Some(ModalEvent::RequestHidden)
        } else {
            None
        }
    }

    pub fn form(&self) -> Option<&FormState<'a>> {
        self.session.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState<'a>> {
        self.session.as_mut()
    }

    /// Intercepts the form submit. Returns `None` while hidden.
    pub fn submit(&mut self) -> Option<SubmitOutcome> {
        let state = self.session.as_ref()?;
        Some(submit(state, &mut self.sink))
    }

    /// Render payload of the open questionnaire.
    pub fn render(&self) -> Option<RenderPayload> {
        self.session.as_ref().map(build_render_payload)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

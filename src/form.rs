//! Contact form: blur/focus feedback and the submit flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser adapter forwards each field's `blur` and `focus` events and the
//! form's `submit` event (after suppressing navigation) to [`ContactForm`].
//! Nothing is sent over the network; a valid submission is handed to a
//! [`SubmissionSink`], by default [`LogSink`], which writes it to the log.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::cell::RefCell;

use serde::Serialize;

use crate::config::NoticeTimings;
use crate::dom::{FieldElement, FormElement};
use crate::feedback::{self, FeedbackEvent, FieldFeedback};
use crate::notice::Notice;
use crate::timer::Scheduler;
use crate::validate::{FieldKind, trim_input, validate};

/// Trimmed values of a valid submission.
///
/// Serialized as `{"name","email","subject","message"}` in that order; a
/// future form backend should accept exactly this shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Destination for valid submissions.
pub trait SubmissionSink {
    fn deliver(&self, payload: &SubmissionPayload);
}

/// Writes submissions to the log at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn deliver(&self, payload: &SubmissionPayload) {
        match serde_json::to_string(payload) {
            Ok(json) => log::info!("Form submitted successfully: {json}"),
            Err(e) => log::warn!("failed to encode submission: {e}"),
        }
    }
}

/// The four field handles, by kind.
pub struct ContactFields<F> {
    pub name: F,
    pub email: F,
    pub subject: F,
    pub message: F,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent(SubmissionPayload),
    /// Every field that failed, in form order.
    Rejected { invalid: Vec<FieldKind> },
}

struct Field<F> {
    element: F,
    feedback: RefCell<FieldFeedback>,
}

impl<F: FieldElement> Field<F> {
    fn handle(&self, event: FeedbackEvent) {
        let current = self.feedback.take();
        let next = current.next(event);
        feedback::apply(&self.element, &next);
        self.feedback.replace(next);
    }
}

pub struct ContactForm<E: FormElement, F, S: Scheduler> {
    form: E,
    fields: [Field<F>; 4],
    scheduler: S,
    timings: NoticeTimings,
    sink: Box<dyn SubmissionSink>,
    notices: RefCell<Vec<Notice<E::Notice, S>>>,
}

impl<E: FormElement, F: FieldElement, S: Scheduler> ContactForm<E, F, S> {
    pub fn new(
        form: E,
        fields: ContactFields<F>,
        scheduler: S,
        timings: NoticeTimings,
        sink: Box<dyn SubmissionSink>,
    ) -> Self {
        let ContactFields { name, email, subject, message } = fields;
        let fields = [name, email, subject, message]
            .map(|element| Field { element, feedback: RefCell::new(FieldFeedback::Neutral) });
        Self { form, fields, scheduler, timings, sink, notices: RefCell::new(Vec::new()) }
    }

    fn field(&self, kind: FieldKind) -> &Field<F> {
        &self.fields[kind.index()]
    }

    /// Validate one field and render the result. Returns whether it passed.
    pub fn blur(&self, kind: FieldKind) -> bool {
        let field = self.field(kind);
        let result = validate(kind, &field.element.value());
        let valid = result.valid;
        field.handle(FeedbackEvent::Validated(result));
        valid
    }

    /// Clear the field's marker until it is validated again.
    pub fn focus(&self, kind: FieldKind) {
        self.field(kind).handle(FeedbackEvent::Focused);
    }

    /// Current marker for `kind`.
    #[must_use]
    pub fn feedback(&self, kind: FieldKind) -> FieldFeedback {
        self.field(kind).feedback.borrow().clone()
    }

    /// Validate every field and either deliver the submission or point the
    /// user at the first problem.
    pub fn submit(&self) -> SubmitOutcome {
        // No short-circuit: each field gets its marker.
        let invalid: Vec<FieldKind> = FieldKind::ALL.into_iter().filter(|&kind| !self.blur(kind)).collect();

        if let Some(first) = invalid.first() {
            log::debug!("submission rejected; invalid fields: {invalid:?}");
            self.field(*first).element.scroll_into_view();
            return SubmitOutcome::Rejected { invalid };
        }

        let payload = self.payload();
        self.sink.deliver(&payload);
        self.show_notice();
        self.form.reset();
        for field in &self.fields {
            field.handle(FeedbackEvent::Reset);
        }
        SubmitOutcome::Sent(payload)
    }

    fn payload(&self) -> SubmissionPayload {
        let value = |kind: FieldKind| trim_input(&self.field(kind).element.value()).to_owned();
        SubmissionPayload {
            name: value(FieldKind::Name),
            email: value(FieldKind::Email),
            subject: value(FieldKind::Subject),
            message: value(FieldKind::Message),
        }
    }

    fn show_notice(&self) {
        let mut notices = self.notices.borrow_mut();
        notices.retain(|notice| !notice.is_removed());
        match self.form.insert_notice() {
            Ok(element) => notices.push(Notice::show(element, self.scheduler.clone(), self.timings)),
            Err(e) => log::warn!("confirmation notice unavailable: {e}"),
        }
    }

    /// Notices that have not been removed yet.
    #[cfg(test)]
    pub(crate) fn live_notices(&self) -> usize {
        self.notices.borrow().iter().filter(|notice| !notice.is_removed()).count()
    }

    /// Dismiss every live notice, as if each close control was clicked.
    #[cfg(test)]
    pub(crate) fn dismiss_notices(&self) {
        for notice in self.notices.borrow().iter() {
            notice.dismiss();
        }
    }
}

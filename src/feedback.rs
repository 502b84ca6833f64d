//! Per-field feedback markers.
//!
//! DESIGN
//! ======
//! The marker a field shows is a pure function of the previous marker and the
//! latest event ([`FieldFeedback::next`]). Putting that state onto an element
//! is the separate [`apply`] step, which always starts from a clean slate so
//! stale classes or messages never accumulate.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use crate::config::{INVALID_CLASS, VALID_CLASS};
use crate::dom::FieldElement;
use crate::validate::Validation;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FieldFeedback {
    #[default]
    Neutral,
    Valid,
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedbackEvent {
    /// The field was validated (blur or submit).
    Validated(Validation),
    /// The field regained focus.
    Focused,
    /// The form was reset after a successful submission.
    Reset,
}

impl FieldFeedback {
    #[must_use]
    pub fn next(self, event: FeedbackEvent) -> FieldFeedback {
        match (self, event) {
            (_, FeedbackEvent::Validated(Validation { valid: true, .. })) => Self::Valid,
            (_, FeedbackEvent::Validated(Validation { valid: false, message })) => {
                Self::Invalid(message.unwrap_or_default())
            }
            (Self::Neutral | Self::Valid | Self::Invalid(_), FeedbackEvent::Focused | FeedbackEvent::Reset) => {
                Self::Neutral
            }
        }
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Render `feedback` onto `field`.
pub fn apply<F: FieldElement>(field: &F, feedback: &FieldFeedback) {
    field.remove_class(INVALID_CLASS);
    field.remove_class(VALID_CLASS);
    field.clear_message();
    match feedback {
        FieldFeedback::Neutral => {}
        FieldFeedback::Valid => field.add_class(VALID_CLASS),
        FieldFeedback::Invalid(message) => {
            field.add_class(INVALID_CLASS);
            field.show_message(message);
        }
    }
}

//! Contact-form field rules.
//!
//! Each field kind maps a raw input value to a [`Validation`]. Values are
//! trimmed first, rules run in order, and the first failing rule supplies the
//! message. Lengths are counted in UTF-16 code units, the unit the browser
//! reports for an input's length, so an emoji counts as two.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::sync::LazyLock;

use regex::Regex;

/// Structural email check. Deliberately loose: something, `@`, something, `.`,
/// something, with no whitespace and a single `@`. U+FEFF counts as whitespace
/// here, matching the browser's `\s`.
static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$"));

/// Byte order mark, which browsers strip as whitespace but `char::is_whitespace` does not.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

const NAME_MIN_LEN: usize = 2;
const SUBJECT_MIN_LEN: usize = 3;
const MESSAGE_MIN_LEN: usize = 10;

/// The four validated contact-form fields, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Position in [`FieldKind::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Subject => 2,
            Self::Message => 3,
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Self::Name => "Please enter your full name",
            Self::Email => "Please enter your email address",
            Self::Subject => "Please enter a subject",
            Self::Message => "Please enter your message",
        }
    }
}

/// Verdict for one field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub message: Option<String>,
}

impl Validation {
    #[must_use]
    pub fn ok() -> Self {
        Self { valid: true, message: None }
    }

    #[must_use]
    pub fn fail(message: &str) -> Self {
        Self { valid: false, message: Some(message.to_owned()) }
    }
}

/// Strip leading and trailing whitespace the way the browser's `trim()` does.
#[must_use]
pub fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Input length in UTF-16 code units.
fn input_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Validate `value` under the rules for `kind`.
#[must_use]
pub fn validate(kind: FieldKind, value: &str) -> Validation {
    let value = trim_input(value);
    if value.is_empty() {
        return Validation::fail(kind.required_message());
    }
    match kind {
        FieldKind::Name => validate_name(value),
        FieldKind::Email => validate_email(value),
        FieldKind::Subject => validate_min_len(value, SUBJECT_MIN_LEN, "Subject must be at least 3 characters long"),
        FieldKind::Message => {
            validate_min_len(value, MESSAGE_MIN_LEN, "Message must be at least 10 characters long")
        }
    }
}

fn validate_name(value: &str) -> Validation {
    if input_len(value) < NAME_MIN_LEN {
        return Validation::fail("Name must be at least 2 characters long");
    }
    if !value.chars().any(|c| c.is_ascii_alphabetic()) {
        return Validation::fail("Please enter a valid name");
    }
    Validation::ok()
}

fn validate_email(value: &str) -> Validation {
    if is_email_shaped(value) {
        Validation::ok()
    } else {
        Validation::fail("Please enter a valid email address")
    }
}

fn validate_min_len(value: &str, min: usize, message: &str) -> Validation {
    if input_len(value) < min { Validation::fail(message) } else { Validation::ok() }
}

/// Whether `value` passes the structural email check. A pattern that failed to
/// compile rejects everything.
#[must_use]
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_ok_and(|re| re.is_match(value))
}

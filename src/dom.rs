//! Element handle traits.
//!
//! SYSTEM CONTEXT
//! ==============
//! Feature logic never touches `web_sys` directly. It is written against these
//! small traits, which the `browser` module implements over real DOM elements
//! and `test_support` implements over recording fakes. Handles take `&self`
//! for mutation, mirroring the DOM's shared-reference semantics.

use crate::error::SiteError;

/// Anything carrying a class list.
pub trait ClassTarget {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// A navigation anchor.
pub trait NavLinkElement: ClassTarget {
    /// Raw `href` attribute, if present.
    fn href(&self) -> Option<String>;
}

/// The collapsible mobile menu.
pub trait MobileMenu {
    fn is_expanded(&self) -> bool;
    fn collapse(&self);
}

/// A validated contact-form control.
pub trait FieldElement: ClassTarget {
    fn value(&self) -> String;
    /// Insert an inline feedback message directly after the field.
    fn show_message(&self, message: &str);
    /// Remove any inline feedback message; no-op when none is present.
    fn clear_message(&self);
    /// Bring the field into view with smooth, centred scrolling.
    fn scroll_into_view(&self);
}

/// The contact form container.
pub trait FormElement {
    type Notice: NoticeElement;

    /// Clear every control back to its initial value.
    fn reset(&self);

    /// Build a confirmation notice and insert it right after the form.
    ///
    /// # Errors
    ///
    /// Returns an error when the notice element could not be created or placed.
    fn insert_notice(&self) -> Result<Self::Notice, SiteError>;
}

/// The confirmation banner shown after a successful submission.
pub trait NoticeElement: 'static {
    /// Start the fade-out transition.
    fn begin_fade(&self);
    /// Detach from the page. Must be safe to call more than once.
    fn remove(&self);
    fn scroll_into_view(&self);
    /// Register the close-control handler.
    fn on_close(&self, handler: Box<dyn Fn()>);
}

//! One-way scroll reveal.
//!
//! Elements tagged for animation get the `visible` class the first time they
//! intersect the viewport and keep it afterwards; the stylesheet does the
//! actual fade.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use crate::config::{RevealOptions, VISIBLE_CLASS};
use crate::dom::ClassTarget;

pub struct ScrollRevealer<T> {
    targets: Vec<T>,
    options: RevealOptions,
}

impl<T: ClassTarget> ScrollRevealer<T> {
    /// Returns `None` when there is nothing to watch, in which case no
    /// observer should be created.
    #[must_use]
    pub fn new(targets: Vec<T>, options: RevealOptions) -> Option<Self> {
        if targets.is_empty() {
            return None;
        }
        Some(Self { targets, options })
    }

    #[must_use]
    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    #[must_use]
    pub fn options(&self) -> RevealOptions {
        self.options
    }

    /// Handle one intersection entry. Returns whether the marker was added by
    /// this call.
    pub fn handle_entry(target: &T, is_intersecting: bool) -> bool {
        if !is_intersecting || target.has_class(VISIBLE_CLASS) {
            return false;
        }
        target.add_class(VISIBLE_CLASS);
        true
    }
}

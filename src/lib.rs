//! # resume-site
//!
//! WASM enhancement layer for the static resume pages. The HTML is authored
//! by hand; this crate attaches behaviour to it once the document is ready:
//! navigation highlighting, contact-form validation with a confirmation
//! notice, and scroll-triggered reveal.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`nav`] | Active-link marking and mobile menu collapse |
//! | [`validate`] | Field rules for the contact form |
//! | [`feedback`] | Field marker state and how it is rendered |
//! | [`form`] | Blur/focus handling and the submit flow |
//! | [`notice`] | Confirmation notice lifecycle |
//! | [`reveal`] | One-way scroll reveal |
//! | [`timer`] | Cancellable scheduling and debouncing |
//! | [`dom`] | Element handle traits the features are written against |
//! | [`config`] | Selectors, timings, and log level |
//! | `browser` | `web_sys` implementations and the WASM entry point (`hydrate` feature) |
//!
//! Everything except `browser` is plain Rust and runs under `cargo test`
//! with the fakes in `test_support`.


pub mod config;
pub mod dom;
pub mod error;
pub mod feedback;
pub mod form;
pub mod nav;
pub mod notice;
pub mod reveal;
pub mod timer;
pub mod validate;

#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(test)]
pub(crate) mod test_support;

use crate::config::SiteConfig;
use crate::dom::{FieldElement, FormElement, MobileMenu, NavLinkElement};
use crate::form::{ContactFields, ContactForm, SubmissionSink};
use crate::nav::Navigation;
use crate::reveal::ScrollRevealer;
use crate::timer::Scheduler;

/// Element handles for one page, gathered by the host.
pub struct Page<L, M, E, F, T> {
    pub pathname: String,
    pub nav_links: Vec<L>,
    pub menu: Option<M>,
    /// `None` on pages without a contact form.
    pub contact: Option<(E, ContactFields<F>)>,
    pub reveal_targets: Vec<T>,
}

/// The initialized features, ready for event wiring.
pub struct Site<L, M, E: FormElement, F, S: Scheduler, T> {
    pub navigation: Navigation<L, M>,
    pub contact_form: Option<ContactForm<E, F, S>>,
    pub revealer: Option<ScrollRevealer<T>>,
}

/// Composition root: build every feature from the page's handles and apply
/// the one-shot startup work (active link marking).
pub fn setup<L, M, E, F, S, T>(
    page: Page<L, M, E, F, T>,
    config: &SiteConfig,
    scheduler: S,
    sink: Box<dyn SubmissionSink>,
) -> Site<L, M, E, F, S, T>
where
    L: NavLinkElement,
    M: MobileMenu,
    E: FormElement,
    F: FieldElement,
    S: Scheduler,
    T: dom::ClassTarget,
{
    let Page { pathname, nav_links, menu, contact, reveal_targets } = page;

    let navigation = Navigation::new(nav_links, menu, config.home_page.clone());
    let marked = navigation.highlight_path(&pathname);
    log::debug!("navigation ready: {} links, {marked} active", navigation.links().len());

    let contact_form =
        contact.map(|(form, fields)| ContactForm::new(form, fields, scheduler, config.notice, sink));
    if contact_form.is_none() {
        log::debug!("no contact form on this page");
    }

    let revealer = ScrollRevealer::new(reveal_targets, config.reveal);
    if let Some(revealer) = &revealer {
        log::debug!("scroll reveal watching {} elements", revealer.targets().len());
    }

    Site { navigation, contact_form, revealer }
}

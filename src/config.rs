//! Site configuration: selectors, timings, and reveal options.
//!
//! Every field has a default matching the shipped markup, so a page needs no
//! configuration at all. A page may override any subset by embedding
//! `<script type="application/json" id="site-config">` with a JSON object.
//!
//! Marker class names (`active`, `is-invalid`, `show`, ...) are fixed by the
//! Bootstrap stylesheet and live here as constants rather than config.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::Deserialize;

use crate::error::SiteError;

pub const ACTIVE_CLASS: &str = "active";
pub const INVALID_CLASS: &str = "is-invalid";
pub const VALID_CLASS: &str = "is-valid";
pub const INVALID_FEEDBACK_CLASS: &str = "invalid-feedback";
pub const VALID_FEEDBACK_CLASS: &str = "valid-feedback";
pub const MENU_EXPANDED_CLASS: &str = "show";
pub const VISIBLE_CLASS: &str = "visible";
pub const NOTICE_SHOW_CLASS: &str = "show";

pub const DEFAULT_HOME_PAGE: &str = "index.html";
pub const DEFAULT_NOTICE_VISIBLE_MS: u32 = 5000;
pub const DEFAULT_NOTICE_FADE_MS: u32 = 150;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_REVEAL_BOTTOM_MARGIN_PX: u32 = 50;
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// CSS selectors and element ids the features look up at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub nav_link: String,
    pub menu_toggle: String,
    pub menu_collapse: String,
    pub contact_form_id: String,
    pub name_field_id: String,
    pub email_field_id: String,
    pub subject_field_id: String,
    pub message_field_id: String,
    pub reveal: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            nav_link: ".nav-link".to_owned(),
            menu_toggle: ".navbar-toggler".to_owned(),
            menu_collapse: ".navbar-collapse".to_owned(),
            contact_form_id: "contactForm".to_owned(),
            name_field_id: "name".to_owned(),
            email_field_id: "email".to_owned(),
            subject_field_id: "subject".to_owned(),
            message_field_id: "message".to_owned(),
            reveal: ".animate-on-scroll".to_owned(),
        }
    }
}

/// Confirmation notice lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoticeTimings {
    /// Delay from creation until the fade-out starts.
    pub visible_ms: u32,
    /// Delay from fade-out start until the element is removed. Matches the
    /// stylesheet's `.fade` transition.
    pub fade_ms: u32,
}

impl Default for NoticeTimings {
    fn default() -> Self {
        Self { visible_ms: DEFAULT_NOTICE_VISIBLE_MS, fade_ms: DEFAULT_NOTICE_FADE_MS }
    }
}

/// Intersection options for the scroll revealer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// How far past the bottom viewport edge the element must be before it
    /// counts as visible.
    pub bottom_margin_px: u32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self { threshold: DEFAULT_REVEAL_THRESHOLD, bottom_margin_px: DEFAULT_REVEAL_BOTTOM_MARGIN_PX }
    }
}

impl RevealOptions {
    /// Root margin in CSS shorthand, e.g. `0px 0px -50px 0px`.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub home_page: String,
    pub notice: NoticeTimings,
    pub reveal: RevealOptions,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            home_page: DEFAULT_HOME_PAGE.to_owned(),
            notice: NoticeTimings::default(),
            reveal: RevealOptions::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] for malformed JSON and
    /// [`SiteError::InvalidConfig`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SiteError> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(SiteError::InvalidConfig(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if self.home_page.trim().is_empty() {
            return Err(SiteError::InvalidConfig("home_page must not be empty".to_owned()));
        }
        self.level()?;
        Ok(())
    }

    /// Parsed log level.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::InvalidConfig`] when `log_level` is not a level name.
    pub fn level(&self) -> Result<log::Level, SiteError> {
        log::Level::from_str(&self.log_level)
            .map_err(|_| SiteError::InvalidConfig(format!("unknown log_level '{}'", self.log_level)))
    }
}

//! Error type for the browser-facing plumbing.
//!
//! Validation failures are ordinary values (see [`crate::validate::Validation`]);
//! `SiteError` only covers configuration and DOM binding problems, which the
//! adapters log and then skip the affected feature.

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("site config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid site config: {0}")]
    InvalidConfig(String),
    #[error("dom error: {0}")]
    Dom(String),
    #[error("missing element: {0}")]
    MissingElement(String),
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

//! Crate error type.
//!
//! Missing markup is never an error: every behavior treats an absent element
//! as a valid page configuration and stays inert. `SiteError` covers the
//! remaining failures, which are DOM calls that threw and malformed
//! configuration.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A DOM or JavaScript call threw; the payload is the stringified exception.
    #[error("javascript error: {0}")]
    Js(String),
    /// The embedded configuration document could not be parsed.
    #[error("invalid site configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Not running inside a browser window.
    #[error("no global window")]
    MissingWindow,
    /// The window has no document attached.
    #[error("window has no document")]
    MissingDocument,
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

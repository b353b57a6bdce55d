//! Runtime configuration.
//!
//! DESIGN
//! ======
//! The element ids, classes and selectors are the markup contract and stay
//! fixed in [`crate::consts`]. Only the tuned numbers (nav delays, mobile
//! breakpoint, observer margin) and the console log level live in
//! [`SiteConfig`]. A page may override any subset by embedding a JSON document
//! in `<script type="application/json" id="site-config">`. Unknown keys are
//! ignored and missing keys keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    DEFAULT_LOG_LEVEL, LAZY_ROOT_MARGIN_PX, MOBILE_BREAKPOINT_PX, NAV_FOCUS_DELAY_MS, NAV_LINK_DISMISS_DELAY_MS,
    RESIZE_DEBOUNCE_MS,
};
use crate::error::SiteError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub nav: NavConfig,
    pub lazy: LazyConfig,
    /// Minimum `log` level forwarded to the browser console.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            lazy: LazyConfig::default(),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] when `raw` is not valid JSON or a known
    /// key carries a value of the wrong type.
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// The configured log level, falling back to `Info` when unrecognized.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub breakpoint_px: f64,
    pub focus_delay_ms: u32,
    pub link_dismiss_delay_ms: u32,
    pub resize_debounce_ms: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: MOBILE_BREAKPOINT_PX,
            focus_delay_ms: NAV_FOCUS_DELAY_MS,
            link_dismiss_delay_ms: NAV_LINK_DISMISS_DELAY_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LazyConfig {
    pub root_margin_px: u32,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self { root_margin_px: LAZY_ROOT_MARGIN_PX }
    }
}

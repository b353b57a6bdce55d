//! # saydiet
//!
//! Page behaviors for the SayDiet static site, compiled to WebAssembly and
//! loaded by every page. Each behavior is an independent set of DOM event
//! handlers mounted once when the document is ready; a behavior whose markup
//! is missing stays inert.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`year_stamp`] | Writes the current year into the footer/year elements |
//! | [`nav`] | Mobile navigation state machine and its bindings |
//! | [`smooth_scroll`] | Smooth scrolling for in-page anchors |
//! | [`form`] | Contact form validation with inline errors and a honeypot |
//! | [`lazy_images`] | `loading="lazy"` polyfill |
//! | [`schedule`] | Fire-once and debounced timers |
//! | [`config`] | Overridable timings, breakpoint, margin and log level |
//! | [`consts`] | Ids, selectors and timings |
//! | [`error`] | Crate error type |
//!
//! Browser bindings are compiled with the `hydrate` feature. Without it the
//! crate builds natively and exposes only the browser-free decision logic.

pub mod config;
pub mod consts;
pub mod error;
pub mod form;
pub mod lazy_images;
pub mod nav;
pub mod schedule;
pub mod smooth_scroll;
pub mod year_stamp;

#[cfg(feature = "hydrate")]
mod boot;
#[cfg(feature = "hydrate")]
mod dom;

/// Module start hook: mounts every behavior once the page is ready.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    boot::run().map_err(|err| wasm_bindgen::JsValue::from_str(&err.to_string()))
}

//! Page bootstrap.
//!
//! Runs exactly once per page: installs console logging and the panic hook,
//! reads the optional embedded configuration, then mounts each behavior as
//! soon as the document has been parsed. Behaviors are independent, so one
//! failing to mount is logged and the rest still run.

use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use crate::config::SiteConfig;
use crate::consts::CONFIG_ELEMENT_ID;
use crate::error::SiteError;
use crate::{dom, form, lazy_images, nav, smooth_scroll, year_stamp};

static STARTED: AtomicBool = AtomicBool::new(false);

/// Entry point called from the `wasm_bindgen(start)` hook.
///
/// # Errors
///
/// Fails only when there is no window or document to attach to.
pub fn run() -> Result<(), SiteError> {
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();

    let window = dom::window()?;
    let document = dom::document(&window)?;
    let (config, config_error) = match load_config(&document) {
        Ok(config) => (config, None),
        Err(err) => (SiteConfig::default(), Some(err)),
    };
    install_logging(config.log_level());
    if let Some(err) = config_error {
        log::warn!("boot: {err}; using defaults");
    }

    if is_loading(&document) {
        let ready_document = document.clone();
        let ready = Closure::once_into_js(move || mount_all(&window, &ready_document, &config));
        document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())?;
        log::debug!("boot: waiting for DOMContentLoaded");
    } else {
        mount_all(&window, &document, &config);
    }
    Ok(())
}

fn install_logging(level: log::Level) {
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("boot: logger already installed: {err}");
    }
}

/// Read the embedded timing overrides; a page without them gets the defaults.
fn load_config(document: &Document) -> Result<SiteConfig, SiteError> {
    match document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) {
        Some(raw) => SiteConfig::from_json(&raw),
        None => Ok(SiteConfig::default()),
    }
}

fn is_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}

fn mount_all(window: &Window, document: &Document, config: &SiteConfig) {
    year_stamp::mount(document);
    dom::report("nav", nav::mount(window, document, &config.nav));
    dom::report("smooth_scroll", smooth_scroll::mount(window, document));
    dom::report("form", form::mount(document));
    dom::report("lazy_images", lazy_images::mount(window, document, &config.lazy));
    log::info!("saydiet: page behaviors ready");
}

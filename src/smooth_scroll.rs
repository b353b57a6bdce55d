//! Smooth scrolling for in-page anchors.
//!
//! Each `a[href^="#"]` gets a click handler. When the fragment names an
//! element on the page, the default jump is replaced by a smooth scroll and a
//! history entry is pushed so back/forward and deep links keep working. Bare
//! `#` links and fragments with no matching element keep the browser default.

#[cfg(test)]
#[path = "smooth_scroll_test.rs"]
mod smooth_scroll_test;

/// The selector to resolve for `href`, or `None` when the default behavior applies.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(href)
}

#[cfg(feature = "hydrate")]
pub use browser::mount;

#[cfg(feature = "hydrate")]
mod browser {
    use web_sys::{Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window};

    use super::fragment_target;
    use crate::consts::IN_PAGE_ANCHOR_SELECTOR;
    use crate::dom;
    use crate::error::SiteError;

    pub fn mount(window: &Window, document: &Document) -> Result<(), SiteError> {
        let anchors = dom::query_all(document, IN_PAGE_ANCHOR_SELECTOR)?;
        for anchor in &anchors {
            let link = anchor.clone();
            let window = window.clone();
            let document = document.clone();
            dom::listen(anchor, "click", move |event: Event| {
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                let Some(selector) = fragment_target(&href) else {
                    return;
                };
                // An href that is not a valid selector has no target.
                let Ok(Some(target)) = document.query_selector(selector) else {
                    return;
                };
                event.prevent_default();
                scroll_to(&target);
                if let Err(err) = push_fragment(&window, &href) {
                    log::debug!("smooth_scroll: history not updated for {href}: {err}");
                }
            })?;
        }
        log::debug!("smooth_scroll: bound {} anchor(s)", anchors.len());
        Ok(())
    }

    fn scroll_to(target: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn push_fragment(window: &Window, href: &str) -> Result<(), SiteError> {
        window.history()?.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(href))?;
        Ok(())
    }
}

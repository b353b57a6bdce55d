//! Deferred image loading for browsers without native `loading="lazy"`.
//!
//! DESIGN
//! ======
//! Images carry their real URL in `data-src` and a `loading="lazy"` marker.
//! Browsers that understand the marker load them natively and this module
//! does nothing. Otherwise an `IntersectionObserver` with a 50px root margin
//! promotes each image the first time it nears the viewport; without an
//! observer every image is promoted immediately.
//!
//! [`LazyQueue`] tracks which images are still waiting so an image is promoted
//! at most once even if the observer reports it again before `unobserve`
//! takes effect.

#[cfg(test)]
#[path = "lazy_images_test.rs"]
mod lazy_images_test;

use std::collections::BTreeSet;

/// How deferred images get loaded on this browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStrategy {
    /// The browser defers images itself.
    Native,
    /// Promote each image when it comes within the root margin.
    Observe,
    /// Promote every image right away.
    Eager,
}

impl LoadStrategy {
    #[must_use]
    pub fn detect(native_lazy: bool, has_observer: bool) -> Self {
        match (native_lazy, has_observer) {
            (true, _) => Self::Native,
            (false, true) => Self::Observe,
            (false, false) => Self::Eager,
        }
    }
}

/// The mutation that promotes one deferred image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageLoad {
    /// Value to copy into `src`; `None` leaves `src` untouched.
    pub src: Option<String>,
}

impl ImageLoad {
    /// Promote an image whose staged source is `staged` (the `data-src` value).
    #[must_use]
    pub fn from_staged(staged: Option<String>) -> Self {
        Self { src: staged.filter(|src| !src.is_empty()) }
    }
}

/// CSS `rootMargin` for a margin of `px` pixels on every side.
#[must_use]
pub fn root_margin(px: u32) -> String {
    format!("{px}px")
}

/// Images still waiting to be promoted, by their position in the page.
#[derive(Clone, Debug, Default)]
pub struct LazyQueue {
    pending: BTreeSet<usize>,
}

impl LazyQueue {
    /// A queue holding images `0..count`.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { pending: (0..count).collect() }
    }

    /// Record an intersection report for image `index`.
    ///
    /// Returns `true` only for the first report that finds the image
    /// intersecting; the image then leaves the queue.
    pub fn release(&mut self, index: usize, intersecting: bool) -> bool {
        intersecting && self.pending.remove(&index)
    }
}

#[cfg(feature = "hydrate")]
pub use browser::mount;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use js_sys::{Array, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{
        Document, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node, Window,
    };

    use super::{ImageLoad, LazyQueue, LoadStrategy, root_margin};
    use crate::config::LazyConfig;
    use crate::consts::{LAZY_IMAGE_SELECTOR, LAZY_MARKER_ATTR, STAGED_SRC_ATTR};
    use crate::dom;
    use crate::error::SiteError;

    pub fn mount(window: &Window, document: &Document, config: &LazyConfig) -> Result<(), SiteError> {
        let strategy = LoadStrategy::detect(native_lazy_supported(window)?, observer_supported(window)?);
        if strategy == LoadStrategy::Native {
            log::debug!("lazy_images: native lazy loading available");
            return Ok(());
        }

        let images: Vec<HtmlImageElement> = dom::query_all(document, LAZY_IMAGE_SELECTOR)?
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlImageElement>().ok())
            .collect();
        log::debug!("lazy_images: {strategy:?} for {} image(s)", images.len());

        match strategy {
            LoadStrategy::Native => Ok(()),
            LoadStrategy::Eager => {
                for img in &images {
                    promote(img)?;
                }
                Ok(())
            }
            LoadStrategy::Observe => observe(images, config),
        }
    }

    fn native_lazy_supported(window: &Window) -> Result<bool, SiteError> {
        let ctor = Reflect::get(window, &JsValue::from_str("HTMLImageElement"))?;
        if ctor.is_undefined() {
            return Ok(false);
        }
        let prototype = Reflect::get(&ctor, &JsValue::from_str("prototype"))?;
        Ok(prototype.is_object() && Reflect::has(&prototype, &JsValue::from_str("loading"))?)
    }

    fn observer_supported(window: &Window) -> Result<bool, SiteError> {
        Ok(Reflect::has(window, &JsValue::from_str("IntersectionObserver"))?)
    }

    fn promote(img: &HtmlImageElement) -> Result<(), SiteError> {
        let load = ImageLoad::from_staged(img.get_attribute(STAGED_SRC_ATTR));
        if let Some(src) = &load.src {
            img.set_src(src);
        }
        img.remove_attribute(LAZY_MARKER_ATTR)?;
        Ok(())
    }

    fn observe(images: Vec<HtmlImageElement>, config: &LazyConfig) -> Result<(), SiteError> {
        let queue = Rc::new(RefCell::new(LazyQueue::new(images.len())));
        let images = Rc::new(images);

        let callback = {
            let images = Rc::clone(&images);
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    let target_node: &Node = &target;
                    let Some(index) = images.iter().position(|img| img.is_same_node(Some(target_node))) else {
                        continue;
                    };
                    if !queue.borrow_mut().release(index, entry.is_intersecting()) {
                        continue;
                    }
                    observer.unobserve(&target);
                    dom::report("lazy_images", promote(&images[index]));
                }
            })
        };

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&root_margin(config.root_margin_px));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        callback.forget();
        for img in images.iter() {
            observer.observe(img);
        }
        Ok(())
    }
}

//! Thin `web-sys` helpers shared by the behavior bindings.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::SiteError;

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::MissingWindow)
}

pub fn document(window: &Window) -> Result<Document, SiteError> {
    window.document().ok_or(SiteError::MissingDocument)
}

/// Current layout viewport width in CSS pixels.
pub fn viewport_width(window: &Window) -> Result<f64, SiteError> {
    window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| SiteError::Js("innerWidth is not a number".to_owned()))
}

/// Element with the given id, or `None` when the page has no such element.
pub fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(&document.query_selector_all(selector)?))
}

pub fn query_all_within(root: &Element, selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(&root.query_selector_all(selector)?))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Move keyboard focus to `el` when it is focusable.
pub fn focus(el: &Element) -> Result<(), SiteError> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        html.focus()?;
    }
    Ok(())
}

/// Attach `handler` for the page lifetime.
pub fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<(), SiteError> {
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Log a failure raised inside an event handler, where there is no caller to return it to.
pub fn report(context: &str, result: Result<(), SiteError>) {
    if let Err(err) = result {
        log::warn!("{context}: {err}");
    }
}

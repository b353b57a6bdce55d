//! Mobile navigation panel.
//!
//! ARCHITECTURE
//! ============
//! [`NavCore`] is the two-state machine (Closed, Open). It consumes
//! [`NavTrigger`]s and answers with the ordered [`NavEffect`]s the browser
//! binding applies to the toggle, the panel and `<body>`. Keeping the machine
//! free of `web-sys` lets the attribute/state agreement be tested natively.
//!
//! Timed work is expressed as effects too: the core asks for a deferred
//! dismissal, and the binding feeds [`NavTrigger::DeferredDismiss`] back in
//! when the timer fires. The resize debounce lives entirely in the binding;
//! only the settled width reaches the core as [`NavTrigger::Resized`].

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::config::NavConfig;

/// Whether the panel is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Closed,
    Open,
}

/// Something that happened on the page which may change the panel state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavTrigger {
    /// Click on the toggle control.
    Toggle,
    /// Click on the dedicated close control.
    CloseControl,
    /// `Escape` pressed anywhere in the document.
    Escape,
    /// Click landing outside both the panel and the toggle.
    OutsideClick,
    /// A link inside the panel was activated at the given viewport width.
    LinkActivated { viewport_width: f64 },
    /// The link dismissal delay elapsed.
    DeferredDismiss,
    /// The resize debounce settled at the given viewport width.
    Resized { viewport_width: f64 },
}

/// A single DOM mutation or scheduling request for the binding to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEffect {
    /// Add (`true`) or remove the open class on the panel.
    MarkPanelOpen(bool),
    /// Set `aria-expanded` on the toggle.
    SetExpanded(bool),
    /// Set `aria-hidden` on the panel.
    SetPanelHidden(bool),
    /// Add or remove the menu-open class on `<body>`.
    MarkBody(bool),
    /// Focus the first focusable descendant of the panel after a delay.
    FocusFirstItem { delay_ms: u32 },
    /// Return focus to the toggle control.
    FocusToggle,
    /// Deliver [`NavTrigger::DeferredDismiss`] after a delay.
    ScheduleDismiss { delay_ms: u32 },
}

/// Attribute values implied by a [`NavState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavAttributes {
    pub panel_open: bool,
    pub aria_expanded: &'static str,
    pub aria_hidden: &'static str,
    pub body_marked: bool,
}

impl NavAttributes {
    #[must_use]
    pub fn for_state(state: NavState) -> Self {
        let open = state == NavState::Open;
        Self {
            panel_open: open,
            aria_expanded: bool_attr(open),
            aria_hidden: bool_attr(!open),
            body_marked: open,
        }
    }
}

/// Render a boolean as an ARIA attribute value.
#[must_use]
pub fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[derive(Clone, Debug)]
pub struct NavCore {
    state: NavState,
    breakpoint_px: f64,
    focus_delay_ms: u32,
    link_dismiss_delay_ms: u32,
}

impl Default for NavCore {
    fn default() -> Self {
        Self::new(&NavConfig::default())
    }
}

impl NavCore {
    #[must_use]
    pub fn new(config: &NavConfig) -> Self {
        Self {
            state: NavState::Closed,
            breakpoint_px: config.breakpoint_px,
            focus_delay_ms: config.focus_delay_ms,
            link_dismiss_delay_ms: config.link_dismiss_delay_ms,
        }
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == NavState::Open
    }

    #[must_use]
    pub fn attributes(&self) -> NavAttributes {
        NavAttributes::for_state(self.state)
    }

    /// Attribute writes that bring freshly loaded markup in line with `Closed`.
    #[must_use]
    pub fn initial_effects(&self) -> Vec<NavEffect> {
        let open = self.is_open();
        vec![NavEffect::SetExpanded(open), NavEffect::SetPanelHidden(!open)]
    }

    /// Whether a viewport of `width` pixels uses the mobile layout.
    #[must_use]
    pub fn is_mobile_width(&self, width: f64) -> bool {
        width <= self.breakpoint_px
    }

    /// Advance the machine and return the effects to apply, in order.
    pub fn handle(&mut self, trigger: NavTrigger) -> Vec<NavEffect> {
        match (self.state, trigger) {
            (NavState::Closed, NavTrigger::Toggle) => self.open(),
            (NavState::Open, NavTrigger::Toggle)
            | (NavState::Open, NavTrigger::CloseControl)
            | (NavState::Open, NavTrigger::Escape)
            | (NavState::Open, NavTrigger::OutsideClick)
            | (NavState::Open, NavTrigger::DeferredDismiss) => self.close(),
            (NavState::Open, NavTrigger::LinkActivated { viewport_width }) if self.is_mobile_width(viewport_width) => {
                vec![NavEffect::ScheduleDismiss { delay_ms: self.link_dismiss_delay_ms }]
            }
            (NavState::Open, NavTrigger::Resized { viewport_width }) if !self.is_mobile_width(viewport_width) => {
                self.close()
            }
            _ => Vec::new(),
        }
    }

    fn open(&mut self) -> Vec<NavEffect> {
        self.state = NavState::Open;
        vec![
            NavEffect::MarkPanelOpen(true),
            NavEffect::SetExpanded(true),
            NavEffect::SetPanelHidden(false),
            NavEffect::MarkBody(true),
            NavEffect::FocusFirstItem { delay_ms: self.focus_delay_ms },
        ]
    }

    fn close(&mut self) -> Vec<NavEffect> {
        self.state = NavState::Closed;
        vec![
            NavEffect::MarkPanelOpen(false),
            NavEffect::SetExpanded(false),
            NavEffect::SetPanelHidden(true),
            NavEffect::MarkBody(false),
            NavEffect::FocusToggle,
        ]
    }
}

#[cfg(feature = "hydrate")]
pub use browser::mount;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Event, HtmlElement, KeyboardEvent, Node, Window};

    use super::{NavCore, NavEffect, NavTrigger, bool_attr};
    use crate::config::NavConfig;
    use crate::consts::{BODY_MENU_OPEN_CLASS, NAV_CLOSE_ID, NAV_FOCUSABLE_SELECTOR, NAV_OPEN_CLASS, NAV_PANEL_ID, NAV_TOGGLE_ID};
    use crate::dom;
    use crate::error::SiteError;
    use crate::schedule::{DebounceSlot, debounce, defer};

    struct MobileNav {
        window: Window,
        toggle: HtmlElement,
        panel: HtmlElement,
        body: HtmlElement,
        resize_debounce_ms: u32,
        core: RefCell<NavCore>,
        resize: Rc<RefCell<DebounceSlot<Timeout>>>,
    }

    /// Wire the toggle, close control, panel, document and window listeners.
    ///
    /// Inert when the toggle or the panel is missing.
    pub fn mount(window: &Window, document: &Document, config: &NavConfig) -> Result<(), SiteError> {
        let (Some(toggle), Some(panel)) = (dom::by_id(document, NAV_TOGGLE_ID), dom::by_id(document, NAV_PANEL_ID)) else {
            log::debug!("nav: #{NAV_TOGGLE_ID} or #{NAV_PANEL_ID} not found, staying inert");
            return Ok(());
        };
        let Some(body) = document.body() else {
            log::debug!("nav: document has no body, staying inert");
            return Ok(());
        };

        let nav = Rc::new(MobileNav {
            window: window.clone(),
            toggle,
            panel,
            body,
            resize_debounce_ms: config.resize_debounce_ms,
            core: RefCell::new(NavCore::new(config)),
            resize: Rc::new(RefCell::new(DebounceSlot::new())),
        });
        let initial = nav.core.borrow().initial_effects();
        nav.apply(&initial)?;

        {
            let nav_cb = Rc::clone(&nav);
            dom::listen(&nav.toggle, "click", move |event: Event| {
                event.prevent_default();
                MobileNav::dispatch(&nav_cb, NavTrigger::Toggle);
            })?;
        }

        if let Some(close) = dom::by_id(document, NAV_CLOSE_ID) {
            let nav_cb = Rc::clone(&nav);
            dom::listen(&close, "click", move |event: Event| {
                event.prevent_default();
                MobileNav::dispatch(&nav_cb, NavTrigger::CloseControl);
            })?;
        }

        {
            let nav_cb = Rc::clone(&nav);
            dom::listen(&nav.panel, "click", move |event: Event| {
                if !event_hits_link(&event) {
                    return;
                }
                match dom::viewport_width(&nav_cb.window) {
                    Ok(viewport_width) => {
                        MobileNav::dispatch(&nav_cb, NavTrigger::LinkActivated { viewport_width });
                    }
                    Err(err) => log::warn!("nav: link dismissal skipped: {err}"),
                }
            })?;
        }

        {
            let nav_cb = Rc::clone(&nav);
            dom::listen(document, "keydown", move |event: Event| {
                let is_escape = event.dyn_ref::<KeyboardEvent>().is_some_and(|key| key.key() == "Escape");
                if is_escape {
                    MobileNav::dispatch(&nav_cb, NavTrigger::Escape);
                }
            })?;
        }

        {
            let nav_cb = Rc::clone(&nav);
            dom::listen(document, "click", move |event: Event| {
                if !nav_cb.core.borrow().is_open() {
                    return;
                }
                if !nav_cb.contains_target(&event) {
                    MobileNav::dispatch(&nav_cb, NavTrigger::OutsideClick);
                }
            })?;
        }

        {
            let nav_cb = Rc::clone(&nav);
            dom::listen(window, "resize", move |_event: Event| {
                let settled = Rc::clone(&nav_cb);
                debounce(&nav_cb.resize, nav_cb.resize_debounce_ms, move || {
                    match dom::viewport_width(&settled.window) {
                        Ok(viewport_width) => MobileNav::dispatch(&settled, NavTrigger::Resized { viewport_width }),
                        Err(err) => log::warn!("nav: resize check skipped: {err}"),
                    }
                });
            })?;
        }

        log::debug!("nav: mounted on #{NAV_PANEL_ID}");
        Ok(())
    }

    fn event_hits_link(event: &Event) -> bool {
        event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest("a").unwrap_or(None))
            .is_some()
    }

    impl MobileNav {
        fn dispatch(nav: &Rc<Self>, trigger: NavTrigger) {
            let effects = nav.core.borrow_mut().handle(trigger);
            if effects.is_empty() {
                return;
            }
            log::debug!("nav: {trigger:?} -> {:?}", nav.core.borrow().state());
            dom::report("nav", Self::apply_with_timers(nav, &effects));
        }

        /// Whether the event target sits inside the panel or the toggle.
        fn contains_target(&self, event: &Event) -> bool {
            let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return false;
            };
            self.panel.contains(Some(&node)) || self.toggle.contains(Some(&node))
        }

        /// Apply effects that need no timer.
        fn apply(&self, effects: &[NavEffect]) -> Result<(), SiteError> {
            for effect in effects {
                self.apply_one(*effect)?;
            }
            Ok(())
        }

        fn apply_with_timers(nav: &Rc<Self>, effects: &[NavEffect]) -> Result<(), SiteError> {
            for effect in effects {
                match *effect {
                    NavEffect::FocusFirstItem { delay_ms } => {
                        let nav_cb = Rc::clone(nav);
                        defer(delay_ms, move || dom::report("nav focus", nav_cb.focus_first_item()));
                    }
                    NavEffect::ScheduleDismiss { delay_ms } => {
                        let nav_cb = Rc::clone(nav);
                        defer(delay_ms, move || MobileNav::dispatch(&nav_cb, NavTrigger::DeferredDismiss));
                    }
                    other => nav.apply_one(other)?,
                }
            }
            Ok(())
        }

        fn apply_one(&self, effect: NavEffect) -> Result<(), SiteError> {
            match effect {
                NavEffect::MarkPanelOpen(open) => set_class(&self.panel, NAV_OPEN_CLASS, open)?,
                NavEffect::SetExpanded(expanded) => self.toggle.set_attribute("aria-expanded", bool_attr(expanded))?,
                NavEffect::SetPanelHidden(hidden) => self.panel.set_attribute("aria-hidden", bool_attr(hidden))?,
                NavEffect::MarkBody(marked) => set_class(&self.body, BODY_MENU_OPEN_CLASS, marked)?,
                NavEffect::FocusToggle => self.toggle.focus()?,
                NavEffect::FocusFirstItem { .. } | NavEffect::ScheduleDismiss { .. } => {
                    log::trace!("nav: timed effect {effect:?} ignored outside dispatch");
                }
            }
            Ok(())
        }

        fn focus_first_item(&self) -> Result<(), SiteError> {
            if let Some(first) = self.panel.query_selector(NAV_FOCUSABLE_SELECTOR)? {
                dom::focus(&first)?;
            }
            Ok(())
        }
    }

    fn set_class(el: &HtmlElement, class: &str, on: bool) -> Result<(), SiteError> {
        if on {
            el.class_list().add_1(class)?;
        } else {
            el.class_list().remove_1(class)?;
        }
        Ok(())
    }
}

//! Contact form validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form posts to whatever its `action` names; this module only decides
//! whether the browser may submit. On every submit the previous error markers
//! are cleared, each [`FieldRule`] is checked against the trimmed field
//! value, and the hidden honeypot field is inspected. Any failure blocks the
//! submission and focuses the first offending field.
//!
//! Each error marker owns a one-shot `input` listener on its field. The
//! listener removes the marker the first time the user edits the field; the
//! next validation pass detaches whatever listeners did not fire.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::sync::LazyLock;

use fancy_regex::Regex;

/// What a field's trimmed value must satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// At least this many UTF-16 code units.
    MinLength(usize),
    /// Shaped like `local@domain.tld`.
    Email,
}

/// A validated field: its element id, human label and constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRule {
    pub id: &'static str,
    pub label: &'static str,
    pub constraint: Constraint,
}

/// The contact form's fields, in the order errors are reported.
pub const CONTACT_RULES: [FieldRule; 3] = [
    FieldRule { id: "name", label: "Full name", constraint: Constraint::MinLength(2) },
    FieldRule { id: "email", label: "Email", constraint: Constraint::Email },
    FieldRule { id: "message", label: "Message", constraint: Constraint::MinLength(10) },
];

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

static EMAIL_SHAPE: LazyLock<Result<Regex, fancy_regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Whether `value` looks like `local@domain.tld`. Deliberately permissive.
#[must_use]
pub fn is_email_shaped(value: &str) -> bool {
    match EMAIL_SHAPE.as_ref() {
        Ok(re) => re.is_match(value).unwrap_or(false),
        Err(err) => {
            log::error!("form: email pattern failed to compile: {err}");
            false
        }
    }
}

/// Strip surrounding whitespace the way a DOM `String.prototype.trim` does,
/// which also drops the byte-order mark.
fn trim_field(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// The inline message for `raw`, or `None` when the field is acceptable.
///
/// Lengths are counted in UTF-16 code units, matching the browser's notion of
/// a string's length.
#[must_use]
pub fn check_field(rule: &FieldRule, raw: &str) -> Option<String> {
    let value = trim_field(raw);
    match rule.constraint {
        Constraint::Email if !is_email_shaped(value) => Some(INVALID_EMAIL_MESSAGE.to_owned()),
        Constraint::MinLength(min) if !value.is_empty() && value.encode_utf16().count() < min => {
            Some(format!("{} must be at least {min} characters", rule.label))
        }
        _ if value.is_empty() => Some(format!("{} is required", rule.label)),
        _ => None,
    }
}

/// A field that failed its rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: &'static str,
    pub message: String,
}

/// Outcome of one submit attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    /// Visible failures, in rule order.
    pub failures: Vec<FieldFailure>,
    /// The honeypot carried a value. Never shown to the user.
    pub honeypot_tripped: bool,
}

impl Verdict {
    /// Whether the browser may submit the form.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty() && !self.honeypot_tripped
    }
}

/// Check every rule whose field is present, then the honeypot.
///
/// `field_value` returns `None` for a field the page does not have; such
/// fields are skipped. `honeypot` is `None` when the page has no honeypot.
pub fn validate<F>(rules: &[FieldRule], mut field_value: F, honeypot: Option<&str>) -> Verdict
where
    F: FnMut(&str) -> Option<String>,
{
    let failures = rules
        .iter()
        .filter_map(|rule| {
            let raw = field_value(rule.id)?;
            check_field(rule, &raw).map(|message| FieldFailure { field: rule.id, message })
        })
        .collect();
    let honeypot_tripped = honeypot.is_some_and(|value| !trim_field(value).is_empty());
    Verdict { failures, honeypot_tripped }
}

#[cfg(feature = "hydrate")]
pub use browser::mount;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{AddEventListenerOptions, Document, Element, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

    use super::{CONTACT_RULES, FieldFailure, validate};
    use crate::consts::{CONTACT_FORM_SELECTOR, FIELD_ERROR_CLASS, FIELD_ERROR_STYLE, HONEYPOT_SELECTOR};
    use crate::dom;
    use crate::error::SiteError;

    /// A displayed error and the listener that will clear it.
    struct FieldCleanup {
        input: Element,
        marker: Element,
        listener: Closure<dyn FnMut(Event)>,
    }

    impl FieldCleanup {
        /// Remove the marker and the listener, whether or not it fired.
        fn detach(self) -> Result<(), SiteError> {
            self.input.remove_event_listener_with_callback("input", self.listener.as_ref().unchecked_ref())?;
            self.marker.remove();
            self.input.remove_attribute("aria-invalid")?;
            Ok(())
        }
    }

    struct ContactForm {
        form: Element,
        cleanups: RefCell<Vec<FieldCleanup>>,
    }

    /// Bind submit validation to the contact form. Inert when the form is missing.
    pub fn mount(document: &Document) -> Result<(), SiteError> {
        let Some(form) = document.query_selector(CONTACT_FORM_SELECTOR)? else {
            log::debug!("form: {CONTACT_FORM_SELECTOR} not found, staying inert");
            return Ok(());
        };
        let contact = Rc::new(ContactForm { form, cleanups: RefCell::new(Vec::new()) });
        let contact_cb = Rc::clone(&contact);
        dom::listen(&contact.form, "submit", move |event: Event| contact_cb.on_submit(&event))?;
        log::debug!("form: validating {CONTACT_FORM_SELECTOR}");
        Ok(())
    }

    impl ContactForm {
        fn on_submit(&self, event: &Event) {
            dom::report("form: clearing errors", self.clear_errors());

            let honeypot = self.honeypot_value();
            let verdict = validate(&CONTACT_RULES, |id| self.field(id).and_then(|el| field_value(&el)), honeypot.as_deref());
            if verdict.is_valid() {
                return;
            }
            event.prevent_default();
            if verdict.honeypot_tripped {
                log::info!("form: submission blocked by honeypot");
            }
            for failure in &verdict.failures {
                dom::report("form: showing error", self.show_error(failure));
            }
            dom::report("form: focusing first error", self.focus_first_error());
        }

        fn field(&self, id: &str) -> Option<Element> {
            self.form.query_selector(&format!("#{id}")).unwrap_or(None)
        }

        fn honeypot_value(&self) -> Option<String> {
            self.form
                .query_selector(HONEYPOT_SELECTOR)
                .unwrap_or(None)
                .and_then(|el| field_value(&el))
        }

        /// Detach pending cleanups, then sweep any marker they did not own.
        fn clear_errors(&self) -> Result<(), SiteError> {
            let pending: Vec<FieldCleanup> = self.cleanups.borrow_mut().drain(..).collect();
            for cleanup in pending {
                cleanup.detach()?;
            }
            for stray in dom::query_all_within(&self.form, &format!(".{FIELD_ERROR_CLASS}"))? {
                stray.remove();
            }
            Ok(())
        }

        fn show_error(&self, failure: &FieldFailure) -> Result<(), SiteError> {
            let Some(input) = self.field(failure.field) else {
                return Ok(());
            };
            let document = self.form.owner_document().ok_or(SiteError::MissingDocument)?;
            let marker = document.create_element("div")?;
            marker.set_class_name(FIELD_ERROR_CLASS);
            if let Some(html) = marker.dyn_ref::<HtmlElement>() {
                let style = html.style();
                for (property, value) in FIELD_ERROR_STYLE {
                    style.set_property(property, value)?;
                }
            }
            marker.set_text_content(Some(&failure.message));
            input.insert_adjacent_element("afterend", &marker)?;
            input.set_attribute("aria-invalid", "true")?;

            let listener = {
                let input = input.clone();
                let marker = marker.clone();
                Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                    marker.remove();
                    dom::report("form: clearing aria-invalid", input.remove_attribute("aria-invalid").map_err(SiteError::from));
                })
            };
            let options = AddEventListenerOptions::new();
            options.set_once(true);
            input.add_event_listener_with_callback_and_add_event_listener_options(
                "input",
                listener.as_ref().unchecked_ref(),
                &options,
            )?;
            self.cleanups.borrow_mut().push(FieldCleanup { input, marker, listener });
            Ok(())
        }

        /// Focus the element just before the first marker in document order.
        fn focus_first_error(&self) -> Result<(), SiteError> {
            let Some(marker) = self.form.query_selector(&format!(".{FIELD_ERROR_CLASS}"))? else {
                return Ok(());
            };
            if let Some(input) = marker.previous_element_sibling() {
                dom::focus(&input)?;
            }
            Ok(())
        }
    }

    /// Current value of an `<input>` or `<textarea>`; `None` for anything else.
    fn field_value(el: &Element) -> Option<String> {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        el.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
    }
}

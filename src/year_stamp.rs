//! Copyright-year stamp.
//!
//! Writes the current calendar year into the year display elements. Elements
//! missing from the page are skipped.

#[cfg(test)]
#[path = "year_stamp_test.rs"]
mod year_stamp_test;

use chrono::Datelike;

/// The four-digit year of `date`, as displayed.
#[must_use]
pub fn year_text<D: Datelike>(date: &D) -> String {
    format!("{:04}", date.year())
}

/// The current local year, read from the system clock.
#[must_use]
pub fn current_year_text() -> String {
    year_text(&chrono::Local::now())
}

#[cfg(feature = "hydrate")]
pub fn mount(document: &web_sys::Document) {
    let text = current_year_text();
    let mut stamped = 0_usize;
    for id in crate::consts::YEAR_ELEMENT_IDS {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(&text));
            stamped += 1;
        }
    }
    log::debug!("year_stamp: wrote {text} into {stamped} element(s)");
}

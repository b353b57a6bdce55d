//! Deferred continuations.
//!
//! Two kinds of delayed work exist: fire-once continuations (menu focus
//! shift, link dismissal) that nothing ever cancels, and the resize debounce,
//! where each new event supersedes the pending timer. [`DebounceSlot`] holds
//! the pending handle; replacing it drops the previous handle, and dropping a
//! `gloo_timers::callback::Timeout` clears the browser timer.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

/// Holds at most one pending timer handle.
#[derive(Debug)]
pub struct DebounceSlot<H> {
    pending: Option<H>,
}

impl<H> Default for DebounceSlot<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> DebounceSlot<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handle` as the pending timer, dropping any previous one.
    ///
    /// Returns `true` when a pending handle was superseded.
    pub fn replace(&mut self, handle: H) -> bool {
        self.pending.replace(handle).is_some()
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{debounce, defer};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;

    use super::DebounceSlot;

    /// Run `work` once after `delay_ms`. The timer is never cancelled.
    pub fn defer(delay_ms: u32, work: impl FnOnce() + 'static) {
        Timeout::new(delay_ms, work).forget();
    }

    /// Schedule `work` after `delay_ms`, cancelling whatever `slot` held.
    ///
    /// The fired handle stays in the slot until the next call replaces it;
    /// dropping a `Timeout` from inside its own callback is not allowed.
    pub fn debounce(slot: &Rc<RefCell<DebounceSlot<Timeout>>>, delay_ms: u32, work: impl FnOnce() + 'static) {
        let timeout = Timeout::new(delay_ms, work);
        if slot.borrow_mut().replace(timeout) {
            log::trace!("debounce: superseded pending timer");
        }
    }
}

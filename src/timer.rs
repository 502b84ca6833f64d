//! Deferred work with cancellable handles.
//!
//! A [`Scheduler`] hands back a handle for each scheduled task; dropping the
//! handle cancels the task if it has not fired yet. The browser scheduler is
//! backed by `gloo_timers::callback::Timeout`, which has exactly these
//! semantics, and tests use a manual clock.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::cell::RefCell;
use std::rc::Rc;

pub trait Scheduler: Clone + 'static {
    /// Cancels the task when dropped.
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Collapses bursts of calls into one, run `wait_ms` after the last call.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    wait_ms: u32,
    pending: Rc<RefCell<Option<S::Handle>>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, wait_ms: u32) -> Self {
        Self { scheduler, wait_ms, pending: Rc::new(RefCell::new(None)) }
    }

    /// Schedule `f`, cancelling whatever call is still pending.
    pub fn call(&self, f: impl FnOnce() + 'static) {
        // Drop the old handle first so it is cancelled before the new one exists.
        self.pending.borrow_mut().take();
        let pending = Rc::downgrade(&self.pending);
        let handle = self.scheduler.schedule(
            self.wait_ms,
            Box::new(move || {
                if let Some(pending) = pending.upgrade() {
                    pending.borrow_mut().take();
                }
                f();
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Cancel the pending call, if any.
    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}

/// Wrap `f` so that a burst of calls runs it once, `wait_ms` after the last
/// call, with that last call's argument.
pub fn debounced<S: Scheduler, A: 'static>(
    scheduler: S,
    wait_ms: u32,
    f: impl Fn(A) + 'static,
) -> impl FnMut(A) {
    let debouncer = Debouncer::new(scheduler, wait_ms);
    let f = Rc::new(f);
    move |arg| {
        let f = Rc::clone(&f);
        debouncer.call(move || f(arg));
    }
}


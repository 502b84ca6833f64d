//! Confirmation notice shown after a successful submission.
//!
//! LIFECYCLE
//! =========
//! `Shown` --(fade timer | close click)--> `Fading` --(removal timer)--> `Removed`
//!
//! The fade timer is armed on creation. Entering `Fading` drops it (cancelling
//! it when the close control got there first) and arms the removal timer.
//! Every timer and the close handler hold only a weak reference, and events
//! arriving in `Fading` or `Removed` have no effect.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::NoticeTimings;
use crate::dom::NoticeElement;
use crate::timer::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticePhase {
    Shown,
    Fading,
    Removed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeEvent {
    FadeTimerFired,
    CloseClicked,
    RemoveTimerFired,
}

/// Side effect requested by a phase transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeEffect {
    BeginFade,
    Remove,
}

impl NoticePhase {
    #[must_use]
    pub fn on(self, event: NoticeEvent) -> (NoticePhase, Option<NoticeEffect>) {
        match (self, event) {
            (Self::Shown, NoticeEvent::FadeTimerFired | NoticeEvent::CloseClicked) => {
                (Self::Fading, Some(NoticeEffect::BeginFade))
            }
            (Self::Fading, NoticeEvent::RemoveTimerFired) => (Self::Removed, Some(NoticeEffect::Remove)),
            (phase, _) => (phase, None),
        }
    }
}

struct NoticeState<N: NoticeElement, S: Scheduler> {
    element: Rc<N>,
    phase: NoticePhase,
    scheduler: S,
    timings: NoticeTimings,
    fade_timer: Option<S::Handle>,
    remove_timer: Option<S::Handle>,
}

/// A live confirmation notice and its pending timers.
pub struct Notice<N: NoticeElement, S: Scheduler> {
    state: Rc<RefCell<NoticeState<N, S>>>,
}

impl<N: NoticeElement, S: Scheduler> Notice<N, S> {
    /// Take ownership of an inserted notice element, scroll it into view and
    /// arm the fade timer.
    pub fn show(element: N, scheduler: S, timings: NoticeTimings) -> Self {
        element.scroll_into_view();
        let element = Rc::new(element);
        let state = Rc::new(RefCell::new(NoticeState {
            element: Rc::clone(&element),
            phase: NoticePhase::Shown,
            scheduler: scheduler.clone(),
            timings,
            fade_timer: None,
            remove_timer: None,
        }));

        let weak = Rc::downgrade(&state);
        element.on_close(Box::new(move || dispatch(&weak, NoticeEvent::CloseClicked)));

        let weak = Rc::downgrade(&state);
        let fade_timer =
            scheduler.schedule(timings.visible_ms, Box::new(move || dispatch(&weak, NoticeEvent::FadeTimerFired)));
        let mut current = state.borrow_mut();
        if current.phase == NoticePhase::Shown {
            current.fade_timer = Some(fade_timer);
        }
        drop(current);

        Self { state }
    }

    /// Manual dismissal, as if the close control was clicked.
    pub fn dismiss(&self) {
        dispatch(&Rc::downgrade(&self.state), NoticeEvent::CloseClicked);
    }

    #[must_use]
    pub fn phase(&self) -> NoticePhase {
        self.state.borrow().phase
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.phase() == NoticePhase::Removed
    }
}

fn dispatch<N: NoticeElement, S: Scheduler>(state: &Weak<RefCell<NoticeState<N, S>>>, event: NoticeEvent) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let (element, effect) = {
        let mut current = state.borrow_mut();
        let (next, effect) = current.phase.on(event);
        if next != current.phase {
            log::debug!("notice {:?} -> {next:?} on {event:?}", current.phase);
        }
        current.phase = next;
        (Rc::clone(&current.element), effect)
    };

    // No borrow is held past this point: element callbacks and the scheduler
    // may dispatch again.
    match effect {
        Some(NoticeEffect::BeginFade) => {
            let (fade_timer, scheduler, fade_ms) = {
                let mut current = state.borrow_mut();
                (current.fade_timer.take(), current.scheduler.clone(), current.timings.fade_ms)
            };
            drop(fade_timer);
            element.begin_fade();
            let weak = Rc::downgrade(&state);
            let remove_timer =
                scheduler.schedule(fade_ms, Box::new(move || dispatch(&weak, NoticeEvent::RemoveTimerFired)));
            let mut current = state.borrow_mut();
            if current.phase == NoticePhase::Fading {
                current.remove_timer = Some(remove_timer);
            }
        }
        Some(NoticeEffect::Remove) => {
            let remove_timer = state.borrow_mut().remove_timer.take();
            drop(remove_timer);
            element.remove();
        }
        None => {}
    }
}

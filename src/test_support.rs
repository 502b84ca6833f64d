//! Recording fakes for the element and scheduler traits.
//!
//! Every fake is a cheap `Rc` handle: tests keep a clone to inspect what the
//! feature code did after handing the original over.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::NOTICE_SHOW_CLASS;
use crate::dom::{ClassTarget, FieldElement, FormElement, MobileMenu, NavLinkElement, NoticeElement};
use crate::error::SiteError;
use crate::form::{SubmissionPayload, SubmissionSink};
use crate::timer::Scheduler;

#[derive(Clone, Default)]
pub struct FakeClasses(Rc<RefCell<Vec<String>>>);

impl FakeClasses {
    pub fn count(&self, class: &str) -> usize {
        self.0.borrow().iter().filter(|c| *c == class).count()
    }
}

impl ClassTarget for FakeClasses {
    fn has_class(&self, class: &str) -> bool {
        self.count(class) > 0
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().push(class.to_owned());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().retain(|c| c != class);
    }
}

macro_rules! delegate_classes {
    ($ty:ty) => {
        impl ClassTarget for $ty {
            fn has_class(&self, class: &str) -> bool {
                self.classes.has_class(class)
            }

            fn add_class(&self, class: &str) {
                self.classes.add_class(class);
            }

            fn remove_class(&self, class: &str) {
                self.classes.remove_class(class);
            }
        }
    };
}

// =============================================================
// Navigation
// =============================================================

#[derive(Clone, Default)]
pub struct FakeLink {
    classes: FakeClasses,
    href: Option<String>,
}

impl FakeLink {
    pub fn new(href: &str) -> Self {
        Self { classes: FakeClasses::default(), href: Some(href.to_owned()) }
    }

    pub fn without_href() -> Self {
        Self::default()
    }

    pub fn class_count(&self, class: &str) -> usize {
        self.classes.count(class)
    }
}

delegate_classes!(FakeLink);

impl NavLinkElement for FakeLink {
    fn href(&self) -> Option<String> {
        self.href.clone()
    }
}

#[derive(Clone)]
pub struct FakeMenu {
    expanded: Rc<Cell<bool>>,
    collapses: Rc<Cell<usize>>,
}

impl FakeMenu {
    pub fn new(expanded: bool) -> Self {
        Self { expanded: Rc::new(Cell::new(expanded)), collapses: Rc::new(Cell::new(0)) }
    }

    pub fn collapse_calls(&self) -> usize {
        self.collapses.get()
    }
}

impl MobileMenu for FakeMenu {
    fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    fn collapse(&self) {
        self.collapses.set(self.collapses.get() + 1);
        self.expanded.set(false);
    }
}

// =============================================================
// Form fields
// =============================================================

#[derive(Clone, Default)]
pub struct FakeField {
    classes: FakeClasses,
    value: Rc<RefCell<String>>,
    message: Rc<RefCell<Option<String>>>,
    message_inserts: Rc<Cell<usize>>,
    scrolls: Rc<Cell<usize>>,
}

impl FakeField {
    pub fn new(value: &str) -> Self {
        let field = Self::default();
        field.set_value(value);
        field
    }

    pub fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_owned();
    }

    pub fn message(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    pub fn message_inserts(&self) -> usize {
        self.message_inserts.get()
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.get()
    }
}

delegate_classes!(FakeField);

impl FieldElement for FakeField {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn show_message(&self, message: &str) {
        self.message_inserts.set(self.message_inserts.get() + 1);
        *self.message.borrow_mut() = Some(message.to_owned());
    }

    fn clear_message(&self) {
        self.message.borrow_mut().take();
    }

    fn scroll_into_view(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }
}

// =============================================================
// Form and notice
// =============================================================

#[derive(Clone, Default)]
pub struct FakeNotice {
    classes: FakeClasses,
    attached: Rc<Cell<bool>>,
    remove_calls: Rc<Cell<usize>>,
    fade_calls: Rc<Cell<usize>>,
    scrolls: Rc<Cell<usize>>,
    close_handler: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl FakeNotice {
    fn attached() -> Self {
        let notice = Self::default();
        notice.attached.set(true);
        notice.classes.add_class(NOTICE_SHOW_CLASS);
        notice
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.get()
    }

    pub fn fade_calls(&self) -> usize {
        self.fade_calls.get()
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.get()
    }

    /// Simulate a click on the close control.
    pub fn click_close(&self) {
        let handler = self.close_handler.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

delegate_classes!(FakeNotice);

impl NoticeElement for FakeNotice {
    fn begin_fade(&self) {
        self.fade_calls.set(self.fade_calls.get() + 1);
        self.classes.remove_class(NOTICE_SHOW_CLASS);
    }

    fn remove(&self) {
        self.remove_calls.set(self.remove_calls.get() + 1);
        self.attached.set(false);
    }

    fn scroll_into_view(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }

    fn on_close(&self, handler: Box<dyn Fn()>) {
        *self.close_handler.borrow_mut() = Some(Rc::from(handler));
    }
}

#[derive(Clone, Default)]
pub struct FakeForm {
    fields: Vec<FakeField>,
    resets: Rc<Cell<usize>>,
    notices: Rc<RefCell<Vec<FakeNotice>>>,
    refuse_notice: Rc<Cell<bool>>,
}

impl FakeForm {
    /// A form whose `reset` empties the given fields.
    pub fn with_fields(fields: &[&FakeField]) -> Self {
        Self { fields: fields.iter().map(|f| (*f).clone()).collect(), ..Self::default() }
    }

    pub fn resets(&self) -> usize {
        self.resets.get()
    }

    pub fn notices(&self) -> Vec<FakeNotice> {
        self.notices.borrow().clone()
    }

    /// Make `insert_notice` fail from now on.
    pub fn refuse_notices(&self) {
        self.refuse_notice.set(true);
    }
}

impl FormElement for FakeForm {
    type Notice = FakeNotice;

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
        for field in &self.fields {
            field.set_value("");
        }
    }

    fn insert_notice(&self) -> Result<FakeNotice, SiteError> {
        if self.refuse_notice.get() {
            return Err(SiteError::Dom("createElement refused".to_owned()));
        }
        let notice = FakeNotice::attached();
        self.notices.borrow_mut().push(notice.clone());
        Ok(notice)
    }
}

// =============================================================
// Sink
// =============================================================

#[derive(Clone, Default)]
pub struct RecordingSink(Rc<RefCell<Vec<SubmissionPayload>>>);

impl RecordingSink {
    pub fn payloads(&self) -> Vec<SubmissionPayload> {
        self.0.borrow().clone()
    }
}

impl SubmissionSink for RecordingSink {
    fn deliver(&self, payload: &SubmissionPayload) {
        self.0.borrow_mut().push(payload.clone());
    }
}

// =============================================================
// Manual clock
// =============================================================

struct PendingTask {
    due_ms: u64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ClockState {
    now_ms: u64,
    next_seq: u64,
    tasks: Vec<PendingTask>,
}

/// Scheduler driven by [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<RefCell<ClockState>>);

/// Cancels its task on drop.
pub struct ManualTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    pub fn now_ms(&self) -> u64 {
        self.0.borrow().now_ms
    }

    /// Tasks scheduled and neither run nor cancelled.
    pub fn pending(&self) -> usize {
        self.0.borrow().tasks.iter().filter(|t| !t.cancelled.get()).count()
    }

    /// Move the clock forward, running due tasks in deadline order. Tasks
    /// scheduled by a running task run too if they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms() + ms;
        while let Some(task) = self.pop_due(target) {
            (task.task)();
        }
        self.0.borrow_mut().now_ms = target;
    }

    fn pop_due(&self, target: u64) -> Option<PendingTask> {
        let mut state = self.0.borrow_mut();
        state.tasks.retain(|t| !t.cancelled.get());
        let index = state
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= target)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;
        let task = state.tasks.remove(index);
        state.now_ms = task.due_ms;
        Some(task)
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualTimer {
        let cancelled = Rc::new(Cell::new(false));
        let mut state = self.0.borrow_mut();
        let seq = state.next_seq;
        state.next_seq += 1;
        let due_ms = state.now_ms + u64::from(delay_ms);
        state.tasks.push(PendingTask { due_ms, seq, cancelled: Rc::clone(&cancelled), task });
        ManualTimer { cancelled }
    }
}

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::test_support::ManualScheduler;

fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
    let hits = Rc::new(Cell::new(0));
    let make = {
        let hits = Rc::clone(&hits);
        move || {
            let hits = Rc::clone(&hits);
            Box::new(move || hits.set(hits.get() + 1)) as Box<dyn FnOnce()>
        }
    };
    (hits, make)
}

// =============================================================
// ManualScheduler contract
// =============================================================

#[test]
fn task_runs_at_deadline() {
    let clock = ManualScheduler::default();
    let (hits, task) = counter();
    let _handle = clock.schedule(100, task());
    clock.advance(99);
    assert_eq!(hits.get(), 0);
    clock.advance(1);
    assert_eq!(hits.get(), 1);
    assert_eq!(clock.now_ms(), 100);
}

#[test]
fn dropping_handle_cancels() {
    let clock = ManualScheduler::default();
    let (hits, task) = counter();
    drop(clock.schedule(10, task()));
    assert_eq!(clock.pending(), 0);
    clock.advance(50);
    assert_eq!(hits.get(), 0);
}

// =============================================================
// Debouncer
// =============================================================

#[test]
fn debouncer_runs_only_last_call_of_a_burst() {
    let clock = ManualScheduler::default();
    let debouncer = Debouncer::new(clock.clone(), 200);
    let last = Rc::new(Cell::new(0));
    for i in 1..=5 {
        let last = Rc::clone(&last);
        debouncer.call(move || last.set(i));
        clock.advance(50);
    }
    assert_eq!(last.get(), 0);
    assert!(debouncer.is_pending());
    clock.advance(200);
    assert_eq!(last.get(), 5);
    assert!(!debouncer.is_pending());
}

#[test]
fn debouncer_calls_spaced_apart_all_run() {
    let clock = ManualScheduler::default();
    let debouncer = Debouncer::new(clock.clone(), 100);
    let (hits, _) = counter();
    for _ in 0..3 {
        let hits = Rc::clone(&hits);
        debouncer.call(move || hits.set(hits.get() + 1));
        clock.advance(150);
    }
    assert_eq!(hits.get(), 3);
}

#[test]
fn debouncer_cancel_drops_pending_call() {
    let clock = ManualScheduler::default();
    let debouncer = Debouncer::new(clock.clone(), 100);
    let (hits, _) = counter();
    let h = Rc::clone(&hits);
    debouncer.call(move || h.set(1));
    debouncer.cancel();
    clock.advance(500);
    assert_eq!(hits.get(), 0);
    assert_eq!(clock.pending(), 0);
}

// =============================================================
// debounced
// =============================================================

#[test]
fn debounced_passes_last_argument_once() {
    let clock = ManualScheduler::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut handler = debounced(clock.clone(), 100, move |arg: &'static str| sink.borrow_mut().push(arg));
    handler("a");
    clock.advance(40);
    handler("b");
    clock.advance(40);
    handler("c");
    clock.advance(99);
    assert!(seen.borrow().is_empty());
    clock.advance(1);
    assert_eq!(*seen.borrow(), ["c"]);
    assert_eq!(clock.pending(), 0);
}

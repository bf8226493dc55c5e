use super::*;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{errors::BridgeError, subscribe::Unsubscribeable};

fn record_events<T: Send + 'static>(
) -> (Arc<Mutex<Vec<Event<T>>>>, impl FnMut(Event<T>) + Send) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_c = Arc::clone(&events);
    (events, move |e| events_c.lock().push(e))
}

#[test]
fn from_values_emits_then_completes() {
    let (events, handler) = record_events();

    Observable::from_values(vec![1, 2, 3]).subscribe_events(handler);

    assert_eq!(
        *events.lock(),
        vec![
            Event::Next(1),
            Event::Next(2),
            Event::Next(3),
            Event::Completed
        ]
    );
}

#[test]
fn each_subscription_replays_production() {
    let productions = Arc::new(AtomicUsize::new(0));
    let productions_c = Arc::clone(&productions);

    let mut observable = Observable::new(move |mut o: Subscriber<i32>| {
        productions_c.fetch_add(1, Ordering::SeqCst);
        o.next(7);
        o.complete();
        Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
    });

    let (first, first_handler) = record_events();
    let (second, second_handler) = record_events();
    observable.subscribe_events(first_handler);
    observable.subscribe_events(second_handler);

    assert_eq!(productions.load(Ordering::SeqCst), 2);
    assert_eq!(*first.lock(), vec![Event::Next(7), Event::Completed]);
    assert_eq!(*second.lock(), vec![Event::Next(7), Event::Completed]);
}

#[test]
fn nothing_is_delivered_after_the_first_terminal_event() {
    let (events, handler) = record_events();

    Observable::new(|mut o: Subscriber<i32>| {
        o.next(1);
        o.error(BridgeError::stream("boom"));
        o.next(2);
        o.complete();
        o.error(BridgeError::stream("again"));
        Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
    })
    .subscribe_events(handler);

    let events = events.lock();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], Event::Next(1));
    assert!(matches!(&events[1], Event::Error(e) if e.to_string() == "boom"));
}

#[test]
fn producer_unsubscribe_logic_runs_on_completion() {
    let torn_down = Arc::new(AtomicUsize::new(0));
    let torn_down_c = Arc::clone(&torn_down);

    let subscription = Observable::new(move |mut o: Subscriber<i32>| {
        o.complete();
        let torn_down = Arc::clone(&torn_down_c);
        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                torn_down.fetch_add(1, Ordering::SeqCst);
            })),
            SubscriptionHandle::Nil,
        )
    })
    .subscribe(Subscriber::on_next(|_| {}));

    assert!(subscription.is_closed());
    assert_eq!(torn_down.load(Ordering::SeqCst), 1);

    // Already released, unsubscribing again is a no-op.
    subscription.unsubscribe();
    assert_eq!(torn_down.load(Ordering::SeqCst), 1);
}

#[test]
fn do_on_dispose_runs_after_completed() {
    let (events, handler) = record_events();
    let events_c = Arc::clone(&events);
    let disposed_after = Arc::new(Mutex::new(None));
    let disposed_after_c = Arc::clone(&disposed_after);

    Observable::from_values(0..3)
        .do_on_dispose(move || {
            *disposed_after_c.lock() = Some(events_c.lock().len());
        })
        .subscribe_events(handler);

    assert_eq!(events.lock().last(), Some(&Event::Completed));
    assert_eq!(*disposed_after.lock(), Some(4));
}

#[test]
fn do_on_dispose_runs_on_error() {
    let disposals = Arc::new(AtomicUsize::new(0));
    let disposals_c = Arc::clone(&disposals);
    let (events, handler) = record_events::<i32>();

    Observable::error(BridgeError::stream("failed"))
        .do_on_dispose(move || {
            disposals_c.fetch_add(1, Ordering::SeqCst);
        })
        .subscribe_events(handler);

    assert_eq!(events.lock().len(), 1);
    assert!(events.lock()[0].is_terminal());
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
}

#[test]
fn unsubscribe_disposes_and_stops_a_live_source() {
    let disposals = Arc::new(AtomicUsize::new(0));
    let disposals_c = Arc::clone(&disposals);
    let upstream_cancelled = Arc::new(AtomicBool::new(false));
    let upstream_cancelled_c = Arc::clone(&upstream_cancelled);
    let held = Arc::new(Mutex::new(None));
    let held_c = Arc::clone(&held);

    // Keeps its subscriber so values can be pushed after subscribe returns.
    let source = Observable::new(move |o: Subscriber<i32>| {
        *held_c.lock() = Some(o);
        let cancelled = Arc::clone(&upstream_cancelled_c);
        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || cancelled.store(true, Ordering::SeqCst))),
            SubscriptionHandle::Nil,
        )
    });

    let (events, handler) = record_events();
    let subscription = source
        .do_on_dispose(move || {
            disposals_c.fetch_add(1, Ordering::SeqCst);
        })
        .subscribe_events(handler);

    let mut held = held.lock();
    let o = held.as_mut().expect("source was subscribed");

    o.next(1);
    subscription.unsubscribe();
    o.next(2);
    o.complete();

    assert_eq!(*events.lock(), vec![Event::Next(1)]);
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
    assert!(upstream_cancelled.load(Ordering::SeqCst));
}

#[test]
fn empty_completes_without_values() {
    let (events, handler) = record_events::<u8>();
    Observable::empty().subscribe_events(handler);
    assert_eq!(*events.lock(), vec![Event::Completed]);
}

#[test]
fn terminal_callbacks_can_be_added_to_a_next_only_subscriber() {
    let completed = Arc::new(AtomicUsize::new(0));
    let completed_c = Arc::clone(&completed);
    let failures = Arc::new(Mutex::new(Vec::new()));
    let failures_c = Arc::clone(&failures);

    let mut completing = Subscriber::on_next(|_: u8| {});
    completing.on_complete(move || {
        completed_c.fetch_add(1, Ordering::SeqCst);
    });
    Observable::from_values(vec![1, 2]).subscribe(completing);

    let mut failing = Subscriber::on_next(|_: u8| {});
    failing.on_error(move |e| failures_c.lock().push(e.to_string()));
    Observable::error(BridgeError::stream("no data")).subscribe(failing);

    assert_eq!(completed.load(Ordering::SeqCst), 1);
    assert_eq!(*failures.lock(), vec![String::from("no data")]);
}

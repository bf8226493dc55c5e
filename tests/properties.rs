//! Property tests for the bridge adapters:
//!
//! 1. Observable to publisher keeps every value in order, then finishes once.
//! 2. Publisher to observable keeps every value in order, completes once and
//!    disposes exactly once after completion.
//! 3. Zip emits `min(len_a, len_b)` pairs in positional order.
//! 4. `drop_first(n)` removes exactly the leading `n` values.

mod register_emissions;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use proptest::prelude::*;
use register_emissions::{register_events, register_receptions};
use rxbridge::{
    publisher::{Completion, Publisher},
    Event, Observable, ObservableExt,
};

proptest! {
    #[test]
    fn observable_as_publisher_preserves_values(values in proptest::collection::vec(any::<i32>(), 0..200)) {
        let (received, on_completion, on_value) = register_receptions();

        let _c = Observable::from_values(values.clone())
            .as_publisher()
            .sink(on_completion, on_value);

        prop_assert_eq!(received.values(), values);
        prop_assert_eq!(received.completions(), vec![Completion::Finished]);
    }

    #[test]
    fn publisher_as_observable_preserves_values(values in proptest::collection::vec(any::<i32>(), 0..200)) {
        let (events, handler) = register_events();
        let disposals = Arc::new(AtomicUsize::new(0));
        let disposals_c = Arc::clone(&disposals);

        Publisher::from_values(values.clone())
            .as_observable()
            .do_on_dispose(move || {
                disposals_c.fetch_add(1, Ordering::SeqCst);
            })
            .subscribe_events(handler);

        let mut expected: Vec<Event<i32>> = values.into_iter().map(Event::Next).collect();
        expected.push(Event::Completed);
        prop_assert_eq!(&*events.lock().unwrap(), &expected);
        prop_assert_eq!(disposals.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zip_pairs_up_to_the_shorter_side(
        left in proptest::collection::vec(any::<u16>(), 0..50),
        right in proptest::collection::vec(any::<u8>(), 0..50),
    ) {
        let (received, on_completion, on_value) = register_receptions();

        let _c = Publisher::from_values(left.clone())
            .zip(Publisher::from_values(right.clone()))
            .sink(on_completion, on_value);

        let expected: Vec<(u16, u8)> = left.into_iter().zip(right).collect();
        prop_assert_eq!(received.values(), expected);
        prop_assert_eq!(received.completions(), vec![Completion::Finished]);
    }

    #[test]
    fn drop_first_skips_the_prefix(values in proptest::collection::vec(any::<i8>(), 0..50), n in 0usize..60) {
        let (received, on_completion, on_value) = register_receptions();

        let _c = Publisher::from_values(values.clone())
            .drop_first(n)
            .sink(on_completion, on_value);

        let expected: Vec<i8> = values.into_iter().skip(n).collect();
        prop_assert_eq!(received.values(), expected);
        prop_assert_eq!(received.completions(), vec![Completion::Finished]);
    }
}

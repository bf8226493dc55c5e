//! The publisher side of the bridge.
//!
//! A [`Publisher`] wraps a constructor that is handed a [`Receiver`] each time
//! someone subscribes. Subscribing starts production right away on the calling
//! context; the returned [`AnyCancellable`] stops it.
//!
//! ```no_run
//! use rxbridge::publisher::{Completion, Publisher};
//!
//! let publisher = Publisher::new(|mut receiver| {
//!     for i in 0..=100 {
//!         receiver.receive(i);
//!     }
//!     receiver.receive_completion(Completion::Finished);
//! });
//!
//! let _cancellable = publisher.sink(
//!     |completion| println!("completion: {:?}", completion),
//!     |value| println!("value: {}", value),
//! );
//! ```
mod cancellable;
mod completion;
mod drop_first;
mod receiver;
mod zip;

pub use cancellable::AnyCancellable;
pub use completion::Completion;
pub use receiver::Receiver;

use std::sync::Arc;

use tracing::trace;

/// A cold producer of values followed by one [`Completion`].
///
/// Cloning is cheap and clones share the constructor. Every subscription runs
/// the constructor again with its own [`Receiver`].
pub struct Publisher<T> {
    produce_fn: Arc<dyn Fn(Receiver<T>) + Send + Sync>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Publisher {
            produce_fn: Arc::clone(&self.produce_fn),
        }
    }
}

impl<T: 'static> Publisher<T> {
    /// Creates a publisher from a constructor invoked once per subscription.
    pub fn new(produce: impl Fn(Receiver<T>) + Send + Sync + 'static) -> Self {
        Publisher {
            produce_fn: Arc::new(produce),
        }
    }

    /// Publishes every item of `values`, then finishes.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
    {
        Publisher::new(move |mut receiver| {
            for v in values.clone() {
                if !receiver.receive(v) {
                    break;
                }
            }
            receiver.receive_completion(Completion::Finished);
        })
    }

    /// Runs the constructor with `receiver` and returns the handle that
    /// cancels this subscription.
    pub fn subscribe(&self, receiver: Receiver<T>) -> AnyCancellable {
        let cancellable = AnyCancellable::new(Arc::clone(receiver.session()));
        trace!(session = %cancellable.session_id(), "publisher subscribed");
        (self.produce_fn)(receiver);
        cancellable
    }

    /// Subscribes with a completion callback and a value callback.
    pub fn sink(
        &self,
        receive_completion: impl FnMut(Completion) + Send + 'static,
        receive_value: impl FnMut(T) + Send + 'static,
    ) -> AnyCancellable {
        self.subscribe(Receiver::new(receive_value, receive_completion))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::*;
    use crate::errors::BridgeError;

    #[test]
    fn sink_receives_values_then_finished() {
        let values = Arc::new(Mutex::new(Vec::new()));
        let values_c = Arc::clone(&values);
        let completions = Arc::new(Mutex::new(Vec::new()));
        let completions_c = Arc::clone(&completions);

        let cancellable = Publisher::from_values(1..=3).sink(
            move |c| completions_c.lock().push(c),
            move |v| values_c.lock().push(v),
        );

        assert!(cancellable.is_closed());
        assert_eq!(*values.lock(), vec![1, 2, 3]);
        assert_eq!(*completions.lock(), vec![Completion::Finished]);
    }

    #[test]
    fn second_completion_is_ignored() {
        let completions = Arc::new(Mutex::new(Vec::new()));
        let completions_c = Arc::clone(&completions);

        let _cancellable = Publisher::new(|mut r: Receiver<i32>| {
            r.receive_completion(Completion::Failure(BridgeError::stream("first")));
            r.receive_completion(Completion::Finished);
            assert!(!r.receive(1));
        })
        .sink(move |c| completions_c.lock().push(c), |_| {});

        let completions = completions.lock();
        assert_eq!(completions.len(), 1);
        assert!(completions[0].is_failure());
    }

    #[test]
    fn constructor_runs_per_subscription() {
        let runs = Arc::new(AtomicUsize::new(0));
        let runs_c = Arc::clone(&runs);
        let publisher = Publisher::new(move |mut r: Receiver<()>| {
            runs_c.fetch_add(1, Ordering::SeqCst);
            r.receive_completion(Completion::Finished);
        });

        let _a = publisher.sink(|_| {}, |_| {});
        let _b = publisher.clone().sink(|_| {}, |_| {});

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropping_the_cancellable_cancels() {
        let held = Arc::new(Mutex::new(None));
        let held_c = Arc::clone(&held);
        let released = Arc::new(AtomicUsize::new(0));
        let released_c = Arc::clone(&released);

        let publisher = Publisher::new(move |r: Receiver<i32>| {
            let released = Arc::clone(&released_c);
            r.on_release(move || {
                released.fetch_add(1, Ordering::SeqCst);
            });
            *held_c.lock() = Some(r);
        });

        drop(publisher.sink(|_| {}, |_| {}));

        let mut held = held.lock();
        let receiver = held.as_mut().expect("constructor ran");
        assert!(receiver.is_closed());
        assert!(!receiver.receive(1));
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }
}

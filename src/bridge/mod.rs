//! Adapters between the two paradigms.
//!
//! [`ObservableExt::as_publisher`](crate::ObservableExt::as_publisher) turns a
//! push-style observable into a [`Publisher`], and [`Publisher::as_observable`]
//! goes the other way. Both map the terminal notifications one to one:
//! `Completed` is `Finished` and `Error(e)` is `Failure(e)`. The error value is
//! forwarded untouched.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::{
    observable::{Event, Observable},
    observer::Observer,
    publisher::{Completion, Publisher, Receiver},
    subscription::subscribe::{
        Subscribeable, Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic,
        Unsubscribeable,
    },
};

impl<T> From<Completion> for Event<T> {
    fn from(completion: Completion) -> Self {
        match completion {
            Completion::Finished => Event::Completed,
            Completion::Failure(e) => Event::Error(e),
        }
    }
}

impl<T> TryFrom<Event<T>> for Completion {
    /// A `Next` event carries no completion; its value is handed back.
    type Error = T;

    fn try_from(event: Event<T>) -> Result<Self, Self::Error> {
        match event {
            Event::Next(v) => Err(v),
            Event::Error(e) => Ok(Completion::Failure(e)),
            Event::Completed => Ok(Completion::Finished),
        }
    }
}

/// Every publisher subscription subscribes to `observable` again; values are
/// forwarded in order and the terminal event becomes the completion.
/// Cancelling the publisher subscription unsubscribes from the observable.
pub(crate) fn observable_as_publisher<O, T>(observable: O) -> Publisher<T>
where
    O: Subscribeable<ObsType = T> + Clone + Send + Sync + 'static,
    T: Send + 'static,
{
    Publisher::new(move |receiver: Receiver<T>| {
        let session = Arc::clone(receiver.session());
        let receiver = Arc::new(Mutex::new(receiver));
        let receiver_e = Arc::clone(&receiver);
        let receiver_c = Arc::clone(&receiver);

        let subscription = observable.clone().subscribe(Subscriber::new(
            move |v| {
                receiver.lock().receive(v);
            },
            move |e| receiver_e.lock().receive_completion(Completion::Failure(e)),
            move || receiver_c.lock().receive_completion(Completion::Finished),
        ));
        trace!(
            session = %session.id(),
            upstream = ?subscription.session_id(),
            "observable bridged to publisher"
        );

        session.on_release(move || subscription.unsubscribe());
    })
}

impl<T: Send + 'static> Publisher<T> {
    /// Adapts this publisher into an [`Observable`].
    ///
    /// Each observation subscribes to the publisher once. Unsubscribing from the
    /// observation cancels that publisher subscription.
    #[must_use]
    pub fn as_observable(&self) -> Observable<T> {
        let publisher = self.clone();

        Observable::new(move |subscriber: Subscriber<T>| {
            let subscriber = Arc::new(Mutex::new(subscriber));
            let subscriber_c = Arc::clone(&subscriber);

            let cancellable = publisher.sink(
                move |completion| match completion {
                    Completion::Finished => subscriber_c.lock().complete(),
                    Completion::Failure(e) => subscriber_c.lock().error(e),
                },
                move |v| subscriber.lock().next(v),
            );

            Subscription::new(
                UnsubscribeLogic::Logic(Box::new(move || cancellable.cancel())),
                SubscriptionHandle::Nil,
            )
        })
    }
}

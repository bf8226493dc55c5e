#![allow(clippy::needless_doctest_main)]
//! The `observable` module provides the push side of the bridge: cold
//! observables that call a subscriber once per value and then once with a
//! terminal event.

mod event;

pub use event::Event;

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, trace};

use crate::{
    bridge,
    errors::StreamError,
    observer::Observer,
    publisher::Publisher,
    relays::Relay,
    subscription::subscribe::{
        Subscribeable, Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic,
    },
};

/// The `Observable` struct represents a cold source of values.
///
/// Nothing happens until it is subscribed to. Every subscription runs the
/// subscribe function again with a fresh [`Subscriber`], so two subscriptions
/// never share production state.
///
/// # Example: synchronous `Observable`
///
/// ```no_run
/// use rxbridge::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
/// use rxbridge::{Observable, Observer, Subscribeable};
///
/// let mut squares = Observable::new(|mut s| {
///     for n in 1..=5 {
///         s.next(n * n);
///     }
///     s.complete();
///     Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
/// });
///
/// // Runs the producer to the end before returning.
/// squares.subscribe(Subscriber::new(
///     |v| println!("square {}", v),
///     |e| eprintln!("failed: {}", e),
///     || println!("done"),
/// ));
/// ```
///
/// # Example: asynchronous `Observable` with `Tokio`
///
/// The producer runs on a task and checks its session before every value, so
/// unsubscribing stops it mid-stream.
///
/// ```no_run
/// use std::time::Duration;
///
/// use rxbridge::{
///     subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic},
///     Observable, Observer, Subscribeable,
/// };
/// use tokio::{task, time};
///
/// #[tokio::main]
/// async fn main() {
///     let mut ticks = Observable::new(|mut o: Subscriber<u64>| {
///         let producer = task::spawn(async move {
///             for tick in 0..1_000 {
///                 if o.is_closed() {
///                     return;
///                 }
///                 o.next(tick);
///                 time::sleep(Duration::from_millis(5)).await;
///             }
///             o.complete();
///         });
///         Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::JoinTask(producer))
///     });
///
///     let subscription = ticks.subscribe(Subscriber::on_next(|tick| println!("tick {}", tick)));
///     if let Err(e) = subscription.join_concurrent().await {
///         eprintln!("producer failed: {}", e);
///     }
/// }
/// ```
pub struct Observable<T> {
    subscribe_fn: Arc<dyn Fn(Subscriber<T>) -> Subscription + Send + Sync>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Observable {
            subscribe_fn: Arc::clone(&self.subscribe_fn),
        }
    }
}

impl<T> Observable<T> {
    /// Creates a new `Observable` with the provided subscribe function.
    ///
    /// `sf` is invoked once per subscription. It drives the `Subscriber` and
    /// returns a `Subscription` carrying the producer's unsubscribe logic and,
    /// for asynchronous producers, a handle to await it. The unsubscribe logic
    /// runs once the session ends, naturally or by cancellation.
    ///
    /// Subscriptions share nothing but `sf` itself, so it may be called again
    /// from inside one of its own subscribers or from several threads at once.
    pub fn new(sf: impl Fn(Subscriber<T>) -> Subscription + Send + Sync + 'static) -> Self {
        Observable {
            subscribe_fn: Arc::new(sf),
        }
    }

    /// Emits every item of `values` and completes. Each subscription iterates
    /// a fresh clone of `values`, stopping early if the subscriber is closed.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
    {
        Observable::new(move |mut o| {
            for v in values.clone() {
                if o.is_closed() {
                    break;
                }
                o.next(v);
            }
            o.complete();
            Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
        })
    }

    /// Completes immediately without emitting.
    #[must_use]
    pub fn empty() -> Self {
        Observable::new(|mut o| {
            o.complete();
            Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
        })
    }

    /// Fails immediately with `e`.
    #[must_use]
    pub fn error(e: StreamError) -> Self {
        Observable::new(move |mut o| {
            o.error(Arc::clone(&e));
            Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
        })
    }
}

/// Extension methods available on every observable.
pub trait ObservableExt<T: 'static>: Subscribeable<ObsType = T> {
    /// Runs `on_dispose` exactly once per subscription, when that subscription
    /// ends by completion, by error or by being unsubscribed.
    ///
    /// On natural termination the callback runs after the terminal event has
    /// been delivered.
    fn do_on_dispose<F>(self, on_dispose: F) -> Observable<T>
    where
        Self: Sized + Clone + Send + Sync + 'static,
        F: Fn() + Send + Sync + 'static,
    {
        let on_dispose = Arc::new(on_dispose);

        Observable::new(move |o| {
            let on_dispose = Arc::clone(&on_dispose);
            o.session().on_release(move || on_dispose());

            let downstream = Arc::new(Mutex::new(o));
            let downstream_e = Arc::clone(&downstream);
            let downstream_c = Arc::clone(&downstream);

            self.clone().subscribe(Subscriber::new(
                move |v| downstream.lock().next(v),
                move |e| downstream_e.lock().error(e),
                move || downstream_c.lock().complete(),
            ))
        })
    }

    /// Subscribes with a single handler receiving every notification as an
    /// [`Event`].
    fn subscribe_events<F>(&mut self, handler: F) -> Subscription
    where
        F: FnMut(Event<T>) + Send + 'static,
    {
        self.subscribe(Subscriber::on_event(handler))
    }

    /// Feeds every value into `relay`.
    ///
    /// Relays never terminate, so completion is swallowed. An error cannot be
    /// represented by a relay either; it is logged and swallowed.
    fn bind_to<R>(&mut self, relay: &R) -> Subscription
    where
        R: Relay<T> + Clone + Send + 'static,
    {
        let relay = relay.clone();
        self.subscribe(Subscriber::new(
            move |v| relay.accept(v),
            |e| error!(error = %e, "source bound to a relay failed, relays cannot fail"),
            || trace!("source bound to a relay completed"),
        ))
    }

    /// Adapts this observable into a [`Publisher`]. Every publisher
    /// subscription subscribes to this observable again.
    fn as_publisher(self) -> Publisher<T>
    where
        Self: Sized + Clone + Send + Sync + 'static,
        T: Send,
    {
        bridge::observable_as_publisher(self)
    }
}

impl<T: 'static> Subscribeable for Observable<T> {
    type ObsType = T;

    fn subscribe(&mut self, v: Subscriber<Self::ObsType>) -> Subscription {
        let session = Arc::clone(v.session());
        trace!(session = %session.id(), "observable subscribed");

        let producer_subscription = (self.subscribe_fn)(v);
        let (teardown, handle) = producer_subscription.into_parts();
        session.on_release(teardown);

        Subscription::bound(session, handle)
    }
}

impl<O, T: 'static> ObservableExt<T> for O where O: Subscribeable<ObsType = T> {}

#[cfg(test)]
mod tests;

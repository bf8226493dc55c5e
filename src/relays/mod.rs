//! Relays are multicast sinks that are also sources: values pushed in with
//! `accept` reach every observer currently subscribed to the relay's
//! observable.
//!
//! Relays never complete and never fail. They are explicit, cheaply cloned
//! handles over shared state; clones feed and observe the same relay.
//!
//! There are two varieties: [`PublishRelay`] delivers only to observers that
//! are subscribed at the time of the push, and [`BehaviorRelay`] also remembers
//! the latest value and replays it to each new observer.

mod behavior_relay;
mod publish_relay;

pub use behavior_relay::*;
pub use publish_relay::*;

use std::{collections::VecDeque, sync::Arc};

use parking_lot::Mutex;
use tracing::trace;

use crate::{
    observable::Observable,
    observer::Observer,
    subscription::{
        subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic},
        SessionId,
    },
};

/// Common surface of both relay varieties.
pub trait Relay<T> {
    /// Pushes `value` to every current observer.
    fn accept(&self, value: T);

    /// The relay as an observable. Unsubscribing removes the observer.
    fn as_observable(&self) -> Observable<T>;

    /// Number of registered observers.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type SharedSubscriber<T> = Arc<Mutex<Subscriber<T>>>;

// What a relay remembers of the values it accepted.
trait Memory<T> {
    fn remember(&mut self, value: &T);
    fn replay(&self) -> Option<T>;
}

struct NoMemory;

impl<T> Memory<T> for NoMemory {
    fn remember(&mut self, _: &T) {}

    fn replay(&self) -> Option<T> {
        None
    }
}

struct Latest<T>(T);

impl<T: Clone> Memory<T> for Latest<T> {
    fn remember(&mut self, value: &T) {
        self.0 = value.clone();
    }

    fn replay(&self) -> Option<T> {
        Some(self.0.clone())
    }
}

struct RelayCore<T, M> {
    observers: Vec<(SessionId, SharedSubscriber<T>)>,
    memory: M,
    // Values accepted while a delivery is in progress, oldest first.
    pending: VecDeque<T>,
    delivering: bool,
}

type SharedCore<T, M> = Arc<Mutex<RelayCore<T, M>>>;

fn new_core<T, M>(memory: M) -> SharedCore<T, M> {
    Arc::new(Mutex::new(RelayCore {
        observers: Vec::with_capacity(16),
        memory,
        pending: VecDeque::new(),
        delivering: false,
    }))
}

// Only one call delivers at a time. A value accepted meanwhile, including one
// accepted from inside an observer, is queued and delivered by that call once
// every observer has seen the current value.
fn accept<T: Clone, M: Memory<T>>(core: &SharedCore<T, M>, value: T) {
    {
        let mut core = core.lock();
        core.memory.remember(&value);
        core.pending.push_back(value);
        if core.delivering {
            trace!(queued = core.pending.len(), "value queued behind a delivery in progress");
            return;
        }
        core.delivering = true;
    }

    loop {
        // Snapshot the observers so none of them runs under the relay lock.
        let (value, observers): (T, Vec<SharedSubscriber<T>>) = {
            let mut core = core.lock();
            match core.pending.pop_front() {
                Some(value) => (
                    value,
                    core.observers.iter().map(|(_, o)| Arc::clone(o)).collect(),
                ),
                None => {
                    core.delivering = false;
                    return;
                }
            }
        };
        for o in observers {
            o.lock().next(value.clone());
        }
    }
}

fn observe<T, M>(core: &SharedCore<T, M>) -> Observable<T>
where
    T: Clone + Send + 'static,
    M: Memory<T> + Send + 'static,
{
    let core = Arc::clone(core);

    Observable::new(move |mut subscriber: Subscriber<T>| {
        let id = subscriber.session().id();

        let replayed = core.lock().memory.replay();
        if let Some(v) = replayed {
            subscriber.next(v);
        }
        if subscriber.is_closed() {
            return Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil);
        }

        core.lock()
            .observers
            .push((id, Arc::new(Mutex::new(subscriber))));
        trace!(session = %id, "observer registered on relay");

        let core = Arc::clone(&core);
        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                core.lock().observers.retain(|(sid, _)| *sid != id);
                trace!(session = %id, "observer removed from relay");
            })),
            SubscriptionHandle::Nil,
        )
    })
}

fn len<T, M>(core: &SharedCore<T, M>) -> usize {
    core.lock().observers.len()
}

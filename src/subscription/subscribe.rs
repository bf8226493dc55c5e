use std::{future::Future, pin::Pin, sync::Arc, thread::JoinHandle as ThreadJoinHandle};

use parking_lot::Mutex;
use tokio::runtime;
use tokio::task::{self, JoinHandle};
use tracing::{error, trace};

use super::{Session, SessionId, TerminalState};
use crate::{
    errors::{BridgeError, StreamError},
    observable::Event,
    observer::Observer,
};

/// Something a [`Subscriber`] can be attached to.
pub trait Subscribeable {
    /// Item type delivered through `next`.
    type ObsType;

    /// The returned `Subscription` is bound to the session of `s`: unsubscribing
    /// cancels that session and runs the producer's unsubscribe logic.
    fn subscribe(&mut self, s: Subscriber<Self::ObsType>) -> Subscription;
}

/// A trait for types that can be unsubscribed, allowing the clean release of
/// resources associated with a subscription.
pub trait Unsubscribeable {
    /// Cancels the subscription and releases the resources held by it.
    ///
    /// After this call nothing more is delivered to the subscriber. Release
    /// actions registered on the session, such as `do_on_dispose` callbacks and
    /// the producer's unsubscribe logic, run exactly once.
    fn unsubscribe(self);
}

type NextFn<T> = Box<dyn FnMut(T) + Send>;
type CompleteFn = Box<dyn FnMut() + Send>;
type ErrorFn = Box<dyn FnMut(StreamError) + Send>;

/// A type that acts as an observer, allowing users to handle emitted values,
/// errors and completion when subscribing to an `Observable`.
///
/// Every `Subscriber` owns a fresh [`Session`]. Values are dropped once the
/// session is closed, and only the first terminal notification is delivered.
pub struct Subscriber<NextFnType> {
    next_fn: NextFn<NextFnType>,
    complete_fn: Option<CompleteFn>,
    error_fn: Option<ErrorFn>,
    session: Arc<Session>,
}

impl<NextFnType> Subscriber<NextFnType> {
    /// Subscriber with a callback for each kind of notification.
    pub fn new(
        next_fn: impl FnMut(NextFnType) + 'static + Send,
        error_fn: impl FnMut(StreamError) + 'static + Send,
        complete_fn: impl FnMut() + 'static + Send,
    ) -> Self {
        Subscriber {
            next_fn: Box::new(next_fn),
            complete_fn: Some(Box::new(complete_fn)),
            error_fn: Some(Box::new(error_fn)),
            session: Session::new(),
        }
    }

    /// Subscriber that only cares about values. Terminal events still close
    /// its session.
    pub fn on_next(next_fn: impl FnMut(NextFnType) + 'static + Send) -> Self {
        Subscriber {
            next_fn: Box::new(next_fn),
            complete_fn: None,
            error_fn: None,
            session: Session::new(),
        }
    }

    /// Create a new Subscriber that receives every notification as an [`Event`].
    pub fn on_event(handler: impl FnMut(Event<NextFnType>) + 'static + Send) -> Self
    where
        NextFnType: 'static,
    {
        let handler = Arc::new(Mutex::new(handler));
        let handler_e = Arc::clone(&handler);
        let handler_c = Arc::clone(&handler);

        Subscriber::new(
            move |v| handler.lock()(Event::Next(v)),
            move |e| handler_e.lock()(Event::Error(e)),
            move || handler_c.lock()(Event::Completed),
        )
    }

    /// Replaces the completion callback.
    pub fn on_complete(&mut self, complete_fn: impl FnMut() + 'static + Send) {
        self.complete_fn = Some(Box::new(complete_fn));
    }

    /// Replaces the error callback.
    pub fn on_error(&mut self, error_fn: impl FnMut(StreamError) + 'static + Send) {
        self.error_fn = Some(Box::new(error_fn));
    }

    /// The session this subscriber delivers into.
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Producers should stop emitting once this returns `true`.
    ///
    /// ```text
    /// Observable::new(|mut subscriber| {
    ///     for v in values {
    ///         if subscriber.is_closed() { break; }
    ///         subscriber.next(v);
    ///     }
    ///     // ...
    /// });
    /// ```
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }
}

impl<T> Observer for Subscriber<T> {
    type NextFnType = T;

    fn next(&mut self, v: Self::NextFnType) {
        if self.session.is_closed() {
            return;
        }
        (self.next_fn)(v);
    }

    fn complete(&mut self) {
        if !self.session.terminate(TerminalState::Completed) {
            return;
        }
        if let Some(cfn) = &mut self.complete_fn {
            (cfn)();
        }
        self.session.release();
    }

    fn error(&mut self, observable_error: StreamError) {
        if !self
            .session
            .terminate(TerminalState::Failed(Arc::clone(&observable_error)))
        {
            return;
        }
        if let Some(efn) = &mut self.error_fn {
            (efn)(observable_error);
        }
        self.session.release();
    }
}

/// Enumeration representing different types of handles used to await
/// asynchronous producers.
pub enum SubscriptionHandle {
    /// Synchronous producer, nothing to await.
    Nil,

    /// Holds a join handle for awaiting an asynchronous producer using Tokio task.
    JoinTask(JoinHandle<()>),

    /// Holds a join handle for awaiting an asynchronous producer using OS thread.
    JoinThread(ThreadJoinHandle<()>),
}

/// Represents an observation of an `Observable`, allowing control over it.
///
/// Subscriptions returned by [`Subscribeable::subscribe`] are bound to the
/// subscriber's session. Subscriptions built by a producer with
/// [`Subscription::new`] carry the producer's unsubscribe logic and an optional
/// handle for awaiting it.
pub struct Subscription {
    pub(crate) unsubscribe_logic: UnsubscribeLogic,
    pub(crate) subscription_future: SubscriptionHandle,
    pub(crate) runtime_handle: Option<runtime::Handle>,
    session: Option<Arc<Session>>,
}

impl Subscription {
    /// Subscription for a producer, pairing its teardown with its await handle.
    ///
    /// The Tokio runtime current at this point, if any, is remembered so that
    /// [`UnsubscribeLogic::Future`] can be spawned on it later.
    #[must_use]
    pub fn new(
        unsubscribe_logic: UnsubscribeLogic,
        subscription_future: SubscriptionHandle,
    ) -> Self {
        Subscription {
            unsubscribe_logic,
            subscription_future,
            runtime_handle: runtime::Handle::try_current().ok(),
            session: None,
        }
    }

    pub(crate) fn bound(session: Arc<Session>, subscription_future: SubscriptionHandle) -> Self {
        Subscription {
            unsubscribe_logic: UnsubscribeLogic::Nil,
            subscription_future,
            runtime_handle: None,
            session: Some(session),
        }
    }

    /// Identity of the session this subscription controls, if it is bound to one.
    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id())
    }

    /// Returns `true` once the bound session has terminated or was cancelled.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.session.as_ref().map_or(false, |s| s.is_closed())
    }

    /// Splits the subscription into its teardown and its await handle.
    pub(crate) fn into_parts(mut self) -> (impl FnOnce() + Send + 'static, SubscriptionHandle) {
        let handle = std::mem::replace(&mut self.subscription_future, SubscriptionHandle::Nil);
        (move || self.unsubscribe(), handle)
    }

    /// Waits for the producer task or thread to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer task failed or the producer thread
    /// panicked.
    pub async fn join_concurrent(self) -> Result<(), BridgeError> {
        match self.subscription_future {
            SubscriptionHandle::JoinTask(task_handle) => {
                task_handle.await?;
                Ok(())
            }
            SubscriptionHandle::JoinThread(thread_handle) => task::spawn_blocking(move || {
                thread_handle.join().map_err(|_| BridgeError::ThreadPanicked)
            })
            .await?,
            SubscriptionHandle::Nil => Ok(()),
        }
    }

    /// Blocks until the OS thread associated with this subscription finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer thread panicked, or if the producer
    /// runs on a Tokio task, which must be awaited with
    /// [`join_concurrent`](Self::join_concurrent) instead.
    pub fn join(self) -> Result<(), BridgeError> {
        match self.subscription_future {
            SubscriptionHandle::JoinThread(thread_handle) => {
                thread_handle.join().map_err(|_| BridgeError::ThreadPanicked)
            }
            SubscriptionHandle::Nil => Ok(()),
            SubscriptionHandle::JoinTask(_) => Err(BridgeError::TaskHandleInBlockingJoin),
        }
    }
}

impl Unsubscribeable for Subscription {
    fn unsubscribe(self) {
        if let Some(session) = self.session {
            session.cancel();
        }
        self.unsubscribe_logic.unsubscribe(self.runtime_handle);
    }
}

/// What a producer needs to run when its session ends.
pub enum UnsubscribeLogic {
    /// Nothing to tear down.
    Nil,

    /// Runs a closure.
    Logic(Box<dyn FnOnce() + Send>),

    /// Spawns a future on the Tokio runtime current when the subscription was
    /// created. Needed when teardown has to `.await`.
    Future(Pin<Box<dyn Future<Output = ()> + Send>>),
}

impl UnsubscribeLogic {
    fn unsubscribe(self, runtime_handle: Option<runtime::Handle>) {
        match self {
            UnsubscribeLogic::Nil => (),
            UnsubscribeLogic::Logic(fnc) => fnc(),
            UnsubscribeLogic::Future(future) => match runtime_handle {
                Some(handle) => {
                    trace!("spawning asynchronous unsubscribe logic");
                    handle.spawn(future);
                }
                None => {
                    error!("asynchronous unsubscribe logic created outside of a Tokio runtime was dropped");
                }
            },
        }
    }
}

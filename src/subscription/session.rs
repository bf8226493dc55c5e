use std::{
    fmt,
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    sync::Arc,
};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::errors::StreamError;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process wide unique identity of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Terminal slot of a session.
#[derive(Debug, Clone, Default)]
pub enum TerminalState {
    #[default]
    Pending,
    Completed,
    Failed(StreamError),
}

impl TerminalState {
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        !matches!(self, TerminalState::Pending)
    }
}

type ReleaseAction = Box<dyn FnOnce() + Send>;

/// One active subscription or observation.
///
/// A session is created together with the `Subscriber` or `Receiver` that
/// owns its delivery callbacks. It records the single terminal state, the
/// cancellation flag and the release actions that must run exactly once when
/// the session ends, whichever way it ends: completion, failure or
/// cancellation.
pub struct Session {
    id: SessionId,
    cancelled: AtomicBool,
    released: AtomicBool,
    terminal: Mutex<TerminalState>,
    release_actions: Mutex<Vec<ReleaseAction>>,
}

impl Session {
    pub(crate) fn new() -> Arc<Self> {
        let session = Session {
            id: SessionId::next(),
            cancelled: AtomicBool::new(false),
            released: AtomicBool::new(false),
            terminal: Mutex::new(TerminalState::Pending),
            release_actions: Mutex::new(Vec::new()),
        };
        trace!(session = %session.id, "session opened");
        Arc::new(session)
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    /// Returns `true` once nothing may be delivered anymore, either because a
    /// terminal state was recorded or because the session was cancelled.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.is_cancelled() || self.terminal.lock().is_terminated()
    }

    #[must_use]
    pub fn terminal_state(&self) -> TerminalState {
        self.terminal.lock().clone()
    }

    /// Records `state` as the terminal state. Returns `false`, and records
    /// nothing, if the session is cancelled or already terminated.
    pub(crate) fn terminate(&self, state: TerminalState) -> bool {
        if self.is_cancelled() {
            return false;
        }
        let mut terminal = self.terminal.lock();
        if terminal.is_terminated() {
            warn!(
                session = %self.id,
                recorded = ?*terminal,
                ignored = ?state,
                "second terminal event ignored"
            );
            return false;
        }
        *terminal = state;
        true
    }

    /// Marks the session cancelled and releases it. Idempotent.
    pub(crate) fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        debug!(session = %self.id, "session cancelled");
        self.release();
    }

    /// Registers an action to run when the session is released. If the session
    /// is already released the action runs right away.
    pub(crate) fn on_release(&self, action: impl FnOnce() + Send + 'static) {
        let mut actions = self.release_actions.lock();
        if self.is_released() {
            drop(actions);
            action();
            return;
        }
        actions.push(Box::new(action));
    }

    /// Runs every registered release action exactly once.
    pub(crate) fn release(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }
        let actions = std::mem::take(&mut *self.release_actions.lock());
        trace!(session = %self.id, actions = actions.len(), "session released");
        for action in actions {
            action();
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("cancelled", &self.is_cancelled())
            .field("released", &self.is_released())
            .field("terminal", &*self.terminal.lock())
            .finish_non_exhaustive()
    }
}

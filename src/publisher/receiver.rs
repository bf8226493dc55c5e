use std::sync::Arc;

use super::Completion;
use crate::subscription::{Session, TerminalState};

type ValueFn<T> = Box<dyn FnMut(T) + Send>;
type CompletionFn = Box<dyn FnMut(Completion) + Send>;

/// The capability a publisher's constructor receives for one subscription.
///
/// It exposes `receive` for values and `receive_completion` for the single
/// terminal signal. Once the subscription is finished, failed or cancelled,
/// further calls are ignored.
pub struct Receiver<T> {
    value_fn: ValueFn<T>,
    completion_fn: CompletionFn,
    session: Arc<Session>,
}

impl<T> Receiver<T> {
    pub fn new(
        receive_value: impl FnMut(T) + Send + 'static,
        receive_completion: impl FnMut(Completion) + Send + 'static,
    ) -> Self {
        Receiver {
            value_fn: Box::new(receive_value),
            completion_fn: Box::new(receive_completion),
            session: Session::new(),
        }
    }

    /// Delivers `value` downstream. Returns `false`, without delivering, when
    /// the subscription no longer accepts values.
    pub fn receive(&mut self, value: T) -> bool {
        if self.session.is_closed() {
            return false;
        }
        (self.value_fn)(value);
        true
    }

    /// Delivers the terminal signal and releases the subscription.
    pub fn receive_completion(&mut self, completion: Completion) {
        let state = match &completion {
            Completion::Finished => TerminalState::Completed,
            Completion::Failure(e) => TerminalState::Failed(Arc::clone(e)),
        };
        if !self.session.terminate(state) {
            return;
        }
        (self.completion_fn)(completion);
        self.session.release();
    }

    /// Registers cleanup to run once when the subscription ends, whether it
    /// finished, failed or was cancelled.
    pub fn on_release(&self, action: impl FnOnce() + Send + 'static) {
        self.session.on_release(action);
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

use std::{collections::VecDeque, sync::Arc};

use parking_lot::Mutex;
use tracing::trace;

use super::{Completion, Publisher, Receiver};

struct ZipState<A, B> {
    left: VecDeque<A>,
    right: VecDeque<B>,
    left_finished: bool,
    right_finished: bool,
}

impl<A, B> ZipState<A, B> {
    fn new() -> Self {
        ZipState {
            left: VecDeque::new(),
            right: VecDeque::new(),
            left_finished: false,
            right_finished: false,
        }
    }

    fn pop_pair(&mut self) -> Option<(A, B)> {
        if self.left.is_empty() || self.right.is_empty() {
            return None;
        }
        Some((self.left.pop_front()?, self.right.pop_front()?))
    }

    // A side that finished with nothing buffered can never be paired again.
    fn is_exhausted(&self) -> bool {
        (self.left_finished && self.left.is_empty()) || (self.right_finished && self.right.is_empty())
    }
}

type SharedState<A, B> = Arc<Mutex<ZipState<A, B>>>;
type SharedReceiver<A, B> = Arc<Mutex<Receiver<(A, B)>>>;

// Emits every complete pair, then finishes if one side is exhausted. The state
// lock is never held while delivering.
fn drain<A, B>(state: &SharedState<A, B>, downstream: &SharedReceiver<A, B>) {
    loop {
        let pair = state.lock().pop_pair();
        match pair {
            Some(pair) => {
                if !downstream.lock().receive(pair) {
                    return;
                }
            }
            None => break,
        }
    }
    if state.lock().is_exhausted() {
        finish(downstream, Completion::Finished);
    }
}

fn finish<A, B>(downstream: &SharedReceiver<A, B>, completion: Completion) {
    let mut downstream = downstream.lock();
    if !downstream.is_closed() {
        downstream.receive_completion(completion);
    }
}

fn forward_completion<A, B>(
    completion: Completion,
    finished: impl FnOnce(&mut ZipState<A, B>),
    state: &SharedState<A, B>,
    downstream: &SharedReceiver<A, B>,
) {
    match completion {
        Completion::Finished => {
            finished(&mut state.lock());
            drain(state, downstream);
        }
        failure @ Completion::Failure(_) => finish(downstream, failure),
    }
}

impl<A: Send + 'static> Publisher<A> {
    /// Pairs the nth value of `self` with the nth value of `other`.
    ///
    /// The side running ahead is buffered. The zip finishes as soon as one side
    /// has finished and has no buffered values left, and fails with the first
    /// failure of either side. Cancelling the zip cancels both sides.
    #[must_use]
    pub fn zip<B: Send + 'static>(self, other: Publisher<B>) -> Publisher<(A, B)> {
        Publisher::new(move |downstream: Receiver<(A, B)>| {
            let session = Arc::clone(downstream.session());
            trace!(session = %session.id(), "zip subscribed");

            let downstream = Arc::new(Mutex::new(downstream));
            let state = Arc::new(Mutex::new(ZipState::new()));

            let (state_lv, downstream_lv) = (Arc::clone(&state), Arc::clone(&downstream));
            let (state_lc, downstream_lc) = (Arc::clone(&state), Arc::clone(&downstream));
            let left = self.sink(
                move |completion| {
                    forward_completion(
                        completion,
                        |s| s.left_finished = true,
                        &state_lc,
                        &downstream_lc,
                    );
                },
                move |v| {
                    state_lv.lock().left.push_back(v);
                    drain(&state_lv, &downstream_lv);
                },
            );
            if session.is_closed() {
                return;
            }

            let (state_rv, downstream_rv) = (Arc::clone(&state), Arc::clone(&downstream));
            let right = other.sink(
                move |completion| {
                    forward_completion(completion, |s| s.right_finished = true, &state, &downstream);
                },
                move |v| {
                    state_rv.lock().right.push_back(v);
                    drain(&state_rv, &downstream_rv);
                },
            );

            session.on_release(move || {
                left.cancel();
                right.cancel();
            });
        })
    }
}

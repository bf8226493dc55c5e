use super::{Latest, Relay, SharedCore};
use crate::observable::Observable;

/// Relay with a memory of one: it always holds a current value, starting with
/// the one given to [`BehaviorRelay::new`], and replays it to every new
/// observer before any later value.
pub struct BehaviorRelay<T> {
    core: SharedCore<T, Latest<T>>,
}

impl<T> Clone for BehaviorRelay<T> {
    fn clone(&self) -> Self {
        BehaviorRelay {
            core: std::sync::Arc::clone(&self.core),
        }
    }
}

impl<T> BehaviorRelay<T> {
    pub fn new(value: T) -> Self {
        BehaviorRelay {
            core: super::new_core(Latest(value)),
        }
    }
}

impl<T: Clone> BehaviorRelay<T> {
    /// The latest accepted value, or the initial one.
    #[must_use]
    pub fn value(&self) -> T {
        self.core.lock().memory.0.clone()
    }
}

impl<T: Clone + Send + 'static> Relay<T> for BehaviorRelay<T> {
    fn accept(&self, value: T) {
        super::accept(&self.core, value);
    }

    fn as_observable(&self) -> Observable<T> {
        super::observe(&self.core)
    }

    fn len(&self) -> usize {
        super::len(&self.core)
    }
}

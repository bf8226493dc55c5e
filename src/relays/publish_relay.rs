use super::{NoMemory, Relay, SharedCore};
use crate::observable::Observable;

/// Relay without memory: a value reaches only the observers subscribed when
/// it is accepted.
///
/// ```no_run
/// use rxbridge::relays::{PublishRelay, Relay};
/// use rxbridge::ObservableExt;
///
/// let relay = PublishRelay::new();
/// relay.accept(1); // nobody is listening, dropped
///
/// let _subscription = relay
///     .as_observable()
///     .subscribe_events(|event| println!("{:?}", event));
/// relay.accept(2); // printed
/// ```
pub struct PublishRelay<T> {
    core: SharedCore<T, NoMemory>,
}

impl<T> Clone for PublishRelay<T> {
    fn clone(&self) -> Self {
        PublishRelay {
            core: std::sync::Arc::clone(&self.core),
        }
    }
}

impl<T> PublishRelay<T> {
    #[must_use]
    pub fn new() -> Self {
        PublishRelay {
            core: super::new_core(NoMemory),
        }
    }
}

impl<T> Default for PublishRelay<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Relay<T> for PublishRelay<T> {
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

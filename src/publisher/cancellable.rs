use std::sync::Arc;

use crate::subscription::{Session, SessionId};

/// Handle to a publisher subscription.
///
/// Cancelling is idempotent. Dropping the handle cancels the subscription,
/// so keep it alive for as long as values should keep flowing.
#[must_use = "dropping an AnyCancellable cancels the subscription"]
pub struct AnyCancellable {
    session: Arc<Session>,
}

impl AnyCancellable {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        AnyCancellable { session }
    }

    /// Stops delivery and releases the subscription.
    pub fn cancel(&self) {
        self.session.cancel();
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    /// Returns `true` once the subscription has finished, failed or been cancelled.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }
}

impl Drop for AnyCancellable {
    fn drop(&mut self) {
        self.cancel();
    }
}

use std::sync::Arc;

use parking_lot::Mutex;

use super::{Publisher, Receiver};

impl<T: Send + 'static> Publisher<T> {
    /// Discards the first `count` values, then forwards the rest and the
    /// completion unchanged.
    #[must_use]
    pub fn drop_first(self, count: usize) -> Publisher<T> {
        Publisher::new(move |downstream: Receiver<T>| {
            let session = Arc::clone(downstream.session());
            let downstream = Arc::new(Mutex::new(downstream));
            let downstream_c = Arc::clone(&downstream);

            let mut remaining = count;
            let upstream = self.sink(
                move |completion| downstream_c.lock().receive_completion(completion),
                move |v| {
                    if remaining > 0 {
                        remaining -= 1;
                        return;
                    }
                    downstream.lock().receive(v);
                },
            );
            session.on_release(move || upstream.cancel());
        })
    }
}

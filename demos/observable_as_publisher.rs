//! Turns a synchronous `Observable` into a `Publisher` and subscribes to it
//! twice. Observables are cold, so every publisher subscription runs the
//! observable's producer again from the start.
//!
//! To run this example, execute `cargo run --example observable_as_publisher`.

use rxbridge::publisher::Completion;
use rxbridge::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
use rxbridge::{Observable, ObservableExt, Observer};

fn main() {
    // Emits the first five powers of two, then completes.
    let powers = Observable::new(|mut o: Subscriber<u32>| {
        for exp in 0..5 {
            o.next(2u32.pow(exp));
        }
        o.complete();
        Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
    });

    let publisher = powers.as_publisher();

    for name in ["first", "second"] {
        // Keep the cancellable alive, dropping it cancels the subscription.
        let _cancellable = publisher.sink(
            move |completion| match completion {
                Completion::Finished => println!("{name} -> finished"),
                Completion::Failure(e) => println!("{name} -> failure: {e}"),
            },
            move |v| println!("{name} -> value: {v}"),
        );
    }
}

//! Turns a `Publisher` into an `Observable` and unsubscribes before it has
//! finished. The producer runs on an OS thread and stops once its receiver is
//! closed; the dispose callback runs exactly once.
//!
//! To run this example, execute `cargo run --example publisher_as_observable`.

use std::{thread, time::Duration};

use rxbridge::publisher::{Completion, Publisher, Receiver};
use rxbridge::subscribe::Subscriber;
use rxbridge::{ObservableExt, Subscribeable, Unsubscribeable};

fn main() {
    let publisher = Publisher::new(|mut receiver: Receiver<u64>| {
        thread::spawn(move || {
            for tick in 0.. {
                // `receive` returns false once the subscription is cancelled.
                if !receiver.receive(tick) {
                    println!("producer stopped at {tick}");
                    return;
                }
                thread::sleep(Duration::from_millis(10));
            }
            receiver.receive_completion(Completion::Finished);
        });
    });

    let mut observer = Subscriber::on_next(|tick| println!("next({tick})"));
    observer.on_complete(|| println!("completed"));

    let subscription = publisher
        .as_observable()
        .do_on_dispose(|| println!("disposed"))
        .subscribe(observer);

    thread::sleep(Duration::from_millis(55));
    subscription.unsubscribe();

    // Give the producer thread time to notice.
    thread::sleep(Duration::from_millis(30));
}

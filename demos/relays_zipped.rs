//! Zips a `PublishRelay` with a `BehaviorRelay` and feeds both from
//! publishers. The behavior relay replays its initial value to the zip, so the
//! first pair is made of initial values and is dropped.
//!
//! To run this example, execute `cargo run --example relays_zipped`.

use rxbridge::publisher::Publisher;
use rxbridge::relays::{BehaviorRelay, PublishRelay, Relay};
use rxbridge::ObservableExt;

fn main() {
    let letters = PublishRelay::<char>::new();
    let counts = BehaviorRelay::new(0);

    let zipped = letters
        .as_observable()
        .as_publisher()
        .zip(counts.as_observable().as_publisher())
        .drop_first(1)
        .sink(
            |completion| println!("completion: {completion:?}"),
            |(letter, count)| println!("({letter}, {count})"),
        );

    Publisher::from_values(['x', 'a', 'b', 'c'])
        .as_observable()
        .bind_to(&letters);
    Publisher::from_values(1..=3).as_observable().bind_to(&counts);

    println!("latest count: {}", counts.value());

    // Detaches the zip from both relays.
    zipped.cancel();
    println!("observers left: {} and {}", letters.len(), counts.len());
}

//! `rxbridge` connects two reactive paradigms.
//!
//! On one side there are push-based [`Observable`]s: a producer calls a
//! [`Subscriber`](subscribe::Subscriber) once per value and then once with
//! `complete` or `error`. On the other side there are
//! [`Publisher`](publisher::Publisher)s: a constructor receives a
//! [`Receiver`](publisher::Receiver) and calls `receive` per value and
//! `receive_completion` once.
//!
//! [`ObservableExt::as_publisher`] and
//! [`Publisher::as_observable`](publisher::Publisher::as_observable) adapt one
//! into the other. Every subscription is an independent
//! [`Session`] that delivers values in order, accepts exactly one terminal
//! event and runs its release actions exactly once.
//!
//! # Example
//!
//! ```no_run
//! use rxbridge::publisher::Completion;
//! use rxbridge::{Event, Observable, ObservableExt};
//!
//! // Observable to publisher.
//! let _cancellable = Observable::from_values(0..=3).as_publisher().sink(
//!     |completion| assert_eq!(completion, Completion::Finished),
//!     |value| println!("receive value: {}", value),
//! );
//!
//! // And back again, with a disposal hook.
//! let publisher = rxbridge::publisher::Publisher::from_values(0..=3);
//! publisher
//!     .as_observable()
//!     .do_on_dispose(|| println!("disposed"))
//!     .subscribe_events(|event| match event {
//!         Event::Next(v) => println!("next({})", v),
//!         Event::Error(e) => println!("error({})", e),
//!         Event::Completed => println!("completed"),
//!     });
//! ```
//!
//! The [`relays`] module provides the multicast sinks used to wire several
//! streams together, and [`demo`] contains the scenarios played by the
//! `rxbridge` binary.

mod bridge;
pub mod demo;
mod errors;
pub mod observable;
mod observer;
pub mod publisher;
pub mod relays;
mod subscription;

pub use errors::*;
pub use observable::{Event, Observable, ObservableExt};
pub use observer::Observer;
pub use subscription::subscribe;
pub use subscription::subscribe::{Subscribeable, Unsubscribeable};
pub use subscription::{Session, SessionId, TerminalState};

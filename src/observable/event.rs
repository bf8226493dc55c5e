use std::fmt;

use crate::errors::StreamError;

/// A single notification of the observable paradigm.
#[derive(Clone)]
pub enum Event<T> {
    Next(T),
    Error(StreamError),
    Completed,
}

impl<T> Event<T> {
    /// Returns `true` for `Error` and `Completed`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Event::Next(_))
    }
}

impl<T: fmt::Debug> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Next(v) => f.debug_tuple("Next").field(v).finish(),
            Event::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
            Event::Completed => f.write_str("Completed"),
        }
    }
}

impl<T: PartialEq> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Event::Next(a), Event::Next(b)) => a == b,
            (Event::Error(a), Event::Error(b)) => a.to_string() == b.to_string(),
            (Event::Completed, Event::Completed) => true,
            _ => false,
        }
    }
}

use std::fmt;

use crate::errors::StreamError;

/// Terminal notification of the publisher paradigm.
#[derive(Clone)]
pub enum Completion {
    Finished,
    Failure(StreamError),
}

impl Completion {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Completion::Failure(_))
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Finished => f.write_str("Finished"),
            Completion::Failure(e) => f.debug_tuple("Failure").field(&e.to_string()).finish(),
        }
    }
}

impl PartialEq for Completion {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Completion::Finished, Completion::Finished) => true,
            (Completion::Failure(a), Completion::Failure(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

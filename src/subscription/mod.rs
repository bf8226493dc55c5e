//! Provides structures and traits related to subscription management.
//!
//! This module includes `Subscriber` for handling observed values, errors and
//! completion, `Subscription` for controlling an observation, and `Session`,
//! the per-subscription record shared by both reactive paradigms.
//!
//! Additionally, it defines the unsubscribe logic a producer hands back and the
//! handles used to await asynchronous producers.
mod session;
pub mod subscribe;

pub use session::{Session, SessionId, TerminalState};

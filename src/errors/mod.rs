//! Error types shared by both reactive paradigms.
//!
//! Stream errors travel through the adapters as [`StreamError`], an opaque
//! reference counted error that is forwarded but never inspected. Failures of
//! the crate itself are reported as [`BridgeError`].
mod bridge_error;

pub use bridge_error::*;

use std::{error::Error, sync::Arc};

/// Opaque error carried by `Event::Error` and `Completion::Failure`.
pub type StreamError = Arc<dyn Error + Send + Sync>;

use std::sync::Arc;

use thiserror::Error;

use super::StreamError;

/// Errors raised by `rxbridge` itself, as opposed to errors flowing through a
/// stream.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("unknown example: {0}")]
    UnknownExample(String),

    #[error("failed to await producer task: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("producer thread panicked")]
    ThreadPanicked,

    #[error("producer runs on a Tokio task, use `join_concurrent().await` instead of `join()`")]
    TaskHandleInBlockingJoin,

    #[error("{0}")]
    Stream(String),
}

impl BridgeError {
    /// Builds a [`StreamError`] carrying `message`, handy for producers that
    /// need to fail a session without a dedicated error type.
    pub fn stream(message: impl Into<String>) -> StreamError {
        Arc::new(BridgeError::Stream(message.into()))
    }
}

//! Notifier port for outbound chat messages.

use crate::assignment::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult = Result<(), NotifierError>;

/// Outbound notification transport.
///
/// The transport offers no retry guarantee of its own; retry policy belongs
/// to the callers. A transport timeout is reported as a plain failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `text` to the private channel of `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when delivery fails.
    async fn send(&self, recipient: UserId, text: &str) -> NotifierResult;
}

/// Error returned by notifier implementations.
#[derive(Debug, Clone, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifierError(Arc<dyn std::error::Error + Send + Sync>);

impl NotifierError {
    /// Wraps a transport error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Creates an error from a plain message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self(Arc::new(std::io::Error::other(message.into())))
    }
}

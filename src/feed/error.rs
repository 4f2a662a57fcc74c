//! Error types for feed operations.

use std::sync::Arc;
use thiserror::Error;

/// Errors reported by the Message Store.
#[derive(Debug, Clone, Error)]
pub enum MessageStoreError {
    /// The store could not be reached or failed internally.
    #[error("message store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageStoreError {
    /// Creates an unavailable error from any error type.
    #[must_use]
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

/// Errors returned by the send operation.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    /// The message text was empty (or whitespace only); rejected before
    /// any store call.
    #[error("message cannot be empty")]
    EmptyMessage,

    /// No user is signed in. The caller is expected to redirect to the
    /// login view; this guard exists defensively.
    #[error("not signed in")]
    NotAuthenticated,

    /// The Message Store rejected the append.
    #[error(transparent)]
    Store(#[from] MessageStoreError),
}

//! Error types for session operations.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants that
//! can be inspected by callers. Nothing here is fatal: every failure is
//! surfaced to the Presentation Layer as a re-promptable message.

use std::sync::Arc;
use thiserror::Error;

/// Errors raised by local field validation, before any backend call.
///
/// These are handled by re-prompting the user; no gateway or store write
/// happens when validation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Registration requires a username.
    #[error("username is required")]
    MissingUsername,

    /// An email address is required.
    #[error("email is required")]
    MissingEmail,

    /// The email address is not well-formed.
    #[error("invalid email address: {0}")]
    MalformedEmail(String),

    /// A password is required.
    #[error("password is required")]
    MissingPassword,
}

/// Errors reported by the Identity Gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The email address is already registered.
    #[error("email already registered: {0}")]
    IdentityConflict(String),

    /// The email/password pair did not verify.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The password was rejected by the gateway's credential policy.
    #[error("password rejected by policy: {0}")]
    WeakCredential(String),

    /// Federated login was cancelled or the provider failed.
    #[error("federated login failed: {0}")]
    FederatedLogin(String),

    /// The gateway could not be reached or failed internally.
    #[error("identity gateway unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Creates a weak-credential error with the given reason.
    #[must_use]
    pub fn weak_credential(reason: impl Into<String>) -> Self {
        Self::WeakCredential(reason.into())
    }

    /// Creates a federated-login error with the given reason.
    #[must_use]
    pub fn federated(reason: impl Into<String>) -> Self {
        Self::FederatedLogin(reason.into())
    }

    /// Creates an unavailable error from any error type.
    #[must_use]
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

/// Errors reported by the Profile Store.
#[derive(Debug, Clone, Error)]
pub enum ProfileStoreError {
    /// The store could not be reached or failed internally.
    #[error("profile store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// A profile document could not be encoded or decoded.
    #[error("profile serialisation error: {0}")]
    Serialisation(String),
}

impl ProfileStoreError {
    /// Creates an unavailable error from any error type.
    #[must_use]
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Creates a serialisation error.
    #[must_use]
    pub fn serialisation(message: impl Into<String>) -> Self {
        Self::Serialisation(message.into())
    }
}

/// Errors returned by session manager operations.
///
/// A sum of the layers an operation crosses: local validation, the
/// Identity Gateway, and the Profile Store.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// A required field was missing or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The Identity Gateway rejected the operation.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The Profile Store rejected the operation.
    #[error(transparent)]
    ProfileStore(#[from] ProfileStoreError),
}

//! Identity Gateway port.
//!
//! The gateway is the external service that verifies credentials, issues
//! identities, and tracks the live session. The session manager never
//! talks to a concrete provider directly; it drives this trait.

use crate::session::{
    domain::{Identity, UserId},
    error::GatewayError,
};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A transition reported on the gateway's session-change stream.
#[derive(Debug, Clone)]
pub enum SessionChange {
    /// An identity is signed in (either freshly or restored at startup).
    SignedIn(Identity),
    /// No identity is signed in.
    SignedOut,
}

/// Live stream of session transitions from the Identity Gateway.
///
/// The current state is delivered immediately on subscription, then every
/// subsequent transition for as long as the stream is held. Dropping the
/// stream (or calling [`SessionChanges::close`]) tears the subscription
/// down; holding one for the life of the process without a teardown path
/// is a resource leak.
#[must_use]
pub struct SessionChanges {
    pending: Option<SessionChange>,
    rx: broadcast::Receiver<SessionChange>,
}

impl SessionChanges {
    /// Creates a stream that yields `initial` first, then live changes
    /// from `rx`.
    pub const fn new(initial: SessionChange, rx: broadcast::Receiver<SessionChange>) -> Self {
        Self {
            pending: Some(initial),
            rx,
        }
    }

    /// Waits for the next session transition.
    ///
    /// Returns `None` once the gateway has shut down and no further
    /// transitions can arrive. A slow consumer that misses intermediate
    /// transitions skips ahead; only the latest state matters for a
    /// session.
    pub async fn next(&mut self) -> Option<SessionChange> {
        if let Some(change) = self.pending.take() {
            return Some(change);
        }

        loop {
            match self.rx.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Tears the subscription down, releasing the gateway-side slot.
    pub fn close(self) {
        drop(self);
    }
}

/// Gateway-side password policy.
///
/// Enforced by gateway implementations when identities are created;
/// violations surface as [`GatewayError::WeakCredential`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    /// Minimum password length in characters.
    pub min_password_chars: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_password_chars: 6,
        }
    }
}

impl CredentialPolicy {
    /// Checks a candidate password against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::WeakCredential`] if the password is too
    /// short.
    pub fn check(&self, password: &str) -> GatewayResult<()> {
        if password.chars().count() < self.min_password_chars {
            return Err(GatewayError::weak_credential(format!(
                "password must be at least {} characters",
                self.min_password_chars
            )));
        }
        Ok(())
    }
}

/// Port for the external identity service.
///
/// Implementations own credential verification, identity creation, and
/// the live session; the session manager layers profile resolution and
/// application state on top.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - `create_identity` rejects an email that is already registered
/// - every successful sign-in and every invalidation is reported on the
///   stream returned by `session_changes`
/// - the stream delivers the current state immediately on subscription
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Verifies an email/password pair and signs the identity in.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidCredentials`] on mismatch, or
    /// [`GatewayError::Unavailable`] if the gateway cannot be reached.
    async fn verify_credentials(&self, email: &str, password: &str) -> GatewayResult<Identity>;

    /// Creates a new identity for the email/password pair and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::IdentityConflict`] if the email is already
    /// registered, or [`GatewayError::WeakCredential`] if the password
    /// fails the gateway's policy.
    async fn create_identity(&self, email: &str, password: &str) -> GatewayResult<Identity>;

    /// Sets the display name held in the gateway's identity metadata.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if the gateway cannot be
    /// reached.
    async fn update_display_name(&self, uid: UserId, display_name: &str) -> GatewayResult<()>;

    /// Initiates federated (provider pop-up) login and signs the
    /// resulting identity in.
    ///
    /// Idempotent for returning users: the same federated account always
    /// maps to the same [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::FederatedLogin`] on cancellation or
    /// provider error.
    async fn federated_login(&self) -> GatewayResult<Identity>;

    /// Invalidates the current session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if the gateway cannot be
    /// reached.
    async fn invalidate_session(&self) -> GatewayResult<()>;

    /// Subscribes to session transitions.
    ///
    /// The returned stream yields the current state immediately, then
    /// every subsequent transition until closed.
    fn session_changes(&self) -> SessionChanges;
}

//! The identity record issued by the Identity Gateway.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A verified identity as reported by the Identity Gateway.
///
/// This is the gateway's view of the account, not the application's: the
/// display name is whatever metadata the gateway holds and may be absent
/// for identities created via email/password before a name was set.
/// Federated identities usually arrive with a provider-supplied name.
///
/// The application-facing view, with the display name fully resolved, is
/// [`super::CurrentUser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier assigned by the gateway.
    uid: UserId,

    /// The email address the identity was created with.
    email: String,

    /// Display name held in gateway metadata, if any.
    display_name: Option<String>,
}

impl Identity {
    /// Creates an identity record.
    #[must_use]
    pub fn new(uid: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            uid,
            email: email.into(),
            display_name,
        }
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub const fn uid(&self) -> UserId {
        self.uid
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the gateway-held display name, if one is set.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

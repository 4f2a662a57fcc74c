//! The profile document stored per user in the Profile Store.

use super::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Display name used whenever neither the profile nor the gateway
/// metadata carries one.
pub const DEFAULT_DISPLAY_NAME: &str = "Anonymous";

/// A user's profile document.
///
/// Written once when the account is registered (or on first federated
/// login) and keyed by the same [`UserId`] the gateway issued. Once
/// written, the profile's display name is authoritative over whatever
/// the gateway's own metadata says.
///
/// # Examples
///
/// ```
/// use mockable::DefaultClock;
/// use palaver::session::domain::{Profile, UserId};
///
/// let clock = DefaultClock;
/// let profile = Profile::new(UserId::new(), "a@example.com", "alice", &clock);
/// assert_eq!(profile.display_name(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// The user this profile belongs to.
    uid: UserId,

    /// Email address recorded at creation time.
    email: String,

    /// The chosen display name.
    display_name: String,

    /// When the profile document was created.
    created_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a profile document stamped with the current time.
    #[must_use]
    pub fn new(
        uid: UserId,
        email: impl Into<String>,
        display_name: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            uid,
            email: email.into(),
            display_name: display_name.into(),
            created_at: clock.utc(),
        }
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn uid(&self) -> UserId {
        self.uid
    }

    /// Returns the recorded email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the chosen display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

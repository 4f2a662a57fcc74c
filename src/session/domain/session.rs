//! Session state and the events it emits.
//!
//! Exactly one [`SessionState`] exists per running client, owned by the
//! session manager and injected into collaborators as a read-only view.
//! There is no module-level singleton.

use super::{DEFAULT_DISPLAY_NAME, Identity, Profile, UserId};
use serde::{Deserialize, Serialize};

/// The authenticated user as presented to the application.
///
/// Unlike [`Identity`], the display name here is fully resolved and never
/// empty: the profile document wins when present, then the gateway's own
/// metadata, then [`DEFAULT_DISPLAY_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Stable identifier assigned by the gateway.
    uid: UserId,

    /// The account's email address.
    email: String,

    /// Resolved display name, never empty.
    display_name: String,
}

impl CurrentUser {
    /// Resolves the application view of a signed-in identity.
    ///
    /// The profile document is authoritative once written; the gateway's
    /// display name is only consulted when no profile exists, and
    /// [`DEFAULT_DISPLAY_NAME`] is the terminal fallback.
    #[must_use]
    pub fn resolve(identity: &Identity, profile: Option<&Profile>) -> Self {
        let display_name = profile
            .map(Profile::display_name)
            .or_else(|| identity.display_name())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_owned();

        Self {
            uid: identity.uid(),
            email: identity.email().to_owned(),
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

    /// Returns the resolved display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Who is currently signed in, if anyone.
///
/// Two durable states (signed in / signed out) plus a degenerate third:
/// `loading` is `true` only between startup and the first gateway
/// notification, after which it stays `false` for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    current_user: Option<CurrentUser>,
    loading: bool,
}

impl SessionState {
    /// The state at startup, before the gateway has reported anything.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            current_user: None,
            loading: true,
        }
    }

    /// Records a signed-in user and settles the loading flag.
    pub fn sign_in(&mut self, user: CurrentUser) {
        self.current_user = Some(user);
        self.loading = false;
    }

    /// Clears the signed-in user and settles the loading flag.
    pub fn sign_out(&mut self) {
        self.current_user = None;
        self.loading = false;
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    /// Returns `true` until the first gateway notification arrives.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Where the Presentation Layer should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationIntent {
    /// Show the chat room.
    Chat,
    /// Show the login form.
    Login,
}

/// State changes emitted by the session manager for the Presentation Layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A user signed in (via login, registration, federated login, or a
    /// restored session).
    SignedIn(CurrentUser),
    /// The session ended; consumers should drop any cached query state.
    SignedOut,
    /// The Presentation Layer should navigate.
    Navigate(NavigationIntent),
}

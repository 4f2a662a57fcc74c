//! Session manager service: the single source of truth for "who is
//! logged in".
//!
//! Bridges Identity Gateway notifications into application state and
//! orchestrates registration, login, federated login, and logout. All
//! state lives in an injectable [`SessionState`] owned by the manager;
//! there is no module-level singleton.

use std::sync::{Arc, RwLock};

use mockable::Clock;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::session::{
    domain::{
        CurrentUser, DEFAULT_DISPLAY_NAME, NavigationIntent, Profile, SessionEvent, SessionState,
    },
    error::AuthError,
    ports::{
        identity_gateway::{IdentityGateway, SessionChange},
        profile_store::ProfileStore,
    },
    validation,
};

/// Capacity of the session-event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Read-only handle onto the session state.
///
/// Cheap to clone and hand to collaborators (the message feed, the
/// Presentation Layer) that need to know who is signed in without being
/// able to mutate the session.
#[derive(Clone)]
pub struct SessionView {
    state: Arc<RwLock<SessionState>>,
}

impl SessionView {
    /// Returns a snapshot of the session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .map_or_else(|_| SessionState::initial(), |guard| guard.clone())
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.state
            .read()
            .ok()
            .and_then(|guard| guard.current_user().cloned())
    }

    /// Returns `true` until the first gateway notification arrives.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().map_or(true, |guard| guard.is_loading())
    }
}

/// Handle for the long-lived session-change listener.
///
/// Returned by [`SessionManager::restore_session`]. The listener runs
/// until the guard is closed or dropped; leaking it for the life of the
/// process without a teardown path is the resource bug this handle
/// exists to prevent.
#[must_use = "dropping the guard tears the session listener down"]
pub struct SessionListenerGuard {
    handle: JoinHandle<()>,
}

impl SessionListenerGuard {
    /// Tears the listener down.
    pub fn close(self) {
        drop(self);
    }

    /// Returns `true` once the listener task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SessionListenerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn apply_sign_in(
    state: &RwLock<SessionState>,
    events: &broadcast::Sender<SessionEvent>,
    user: CurrentUser,
) {
    match state.write() {
        Ok(mut guard) => guard.sign_in(user.clone()),
        Err(_) => {
            error!("session state lock poisoned");
            return;
        }
    }
    // A send error only means no subscriber is listening.
    drop(events.send(SessionEvent::SignedIn(user)));
}

fn apply_sign_out(state: &RwLock<SessionState>, events: &broadcast::Sender<SessionEvent>) {
    match state.write() {
        Ok(mut guard) => guard.sign_out(),
        Err(_) => {
            error!("session state lock poisoned");
            return;
        }
    }
    drop(events.send(SessionEvent::SignedOut));
}

/// Orchestrates the session lifecycle against the Identity Gateway and
/// the Profile Store.
///
/// # Example
///
/// ```ignore
/// let manager = SessionManager::new(gateway, profiles, clock);
/// let listener = manager.restore_session();
///
/// let user = manager.register("a@x.com", "secret1", "alice").await?;
/// assert_eq!(user.display_name(), "alice");
///
/// manager.logout().await?;
/// listener.close();
/// ```
pub struct SessionManager<G, P, K>
where
    G: IdentityGateway,
    P: ProfileStore + 'static,
    K: Clock + Send + Sync,
{
    gateway: Arc<G>,
    profiles: Arc<P>,
    clock: Arc<K>,
    state: Arc<RwLock<SessionState>>,
    events: broadcast::Sender<SessionEvent>,
}

impl<G, P, K> SessionManager<G, P, K>
where
    G: IdentityGateway,
    P: ProfileStore + 'static,
    K: Clock + Send + Sync,
{
    /// Creates a session manager in the initial (loading) state.
    #[must_use]
    pub fn new(gateway: Arc<G>, profiles: Arc<P>, clock: Arc<K>) -> Self {
        let (events, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            gateway,
            profiles,
            clock,
            state: Arc::new(RwLock::new(SessionState::initial())),
            events,
        }
    }

    /// Returns a read-only handle onto the session state.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            state: Arc::clone(&self.state),
        }
    }

    /// Returns a snapshot of the session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.view().state()
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.view().current_user()
    }

    /// Returns `true` until the first gateway notification arrives.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.view().is_loading()
    }

    /// Subscribes to session events for the Presentation Layer.
    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Starts the session-change listener, restoring any persisted
    /// session.
    ///
    /// Invoked once at startup. The gateway reports the current state
    /// immediately: a signed-in identity has its display name resolved
    /// (profile document first, gateway metadata second,
    /// `"Anonymous"` last) and becomes the current user; a signed-out
    /// report clears it. Either way the first notification settles the
    /// `loading` flag.
    ///
    /// Profile Store failures during resolution degrade to the gateway
    /// fallback; they never stop the listener.
    pub fn restore_session(&self) -> SessionListenerGuard {
        let mut changes = self.gateway.session_changes();
        let profiles = Arc::clone(&self.profiles);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            while let Some(change) = changes.next().await {
                match change {
                    SessionChange::SignedIn(identity) => {
                        let profile = match profiles.get(identity.uid()).await {
                            Ok(profile) => profile,
                            Err(err) => {
                                warn!(
                                    uid = %identity.uid(),
                                    error = %err,
                                    "profile lookup failed; using gateway display name"
                                );
                                None
                            }
                        };
                        let user = CurrentUser::resolve(&identity, profile.as_ref());
                        info!(uid = %user.uid(), "session restored");
                        apply_sign_in(&state, &events, user);
                    }
                    SessionChange::SignedOut => {
                        apply_sign_out(&state, &events);
                    }
                }
            }
        });

        SessionListenerGuard { handle }
    }

    /// Registers a new account and signs it in.
    ///
    /// Validates the form fields (username first), creates the identity,
    /// records the username in gateway metadata, and writes the profile
    /// document. On success the session holds the new user and a
    /// navigate-to-chat intent is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] before any backend call when a
    /// field is missing or malformed, [`AuthError::Gateway`] for
    /// identity conflicts, weak passwords, or an unreachable gateway,
    /// and [`AuthError::ProfileStore`] if the profile write fails.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<CurrentUser, AuthError> {
        validation::validate_registration_fields(email, password, username)?;

        let identity = self.gateway.create_identity(email, password).await?;
        self.gateway
            .update_display_name(identity.uid(), username)
            .await?;

        let profile = Profile::new(
            identity.uid(),
            identity.email(),
            username,
            self.clock.as_ref(),
        );
        self.profiles.put(&profile).await?;

        let user = CurrentUser::resolve(&identity, Some(&profile));
        info!(uid = %user.uid(), "registered new user");
        apply_sign_in(&self.state, &self.events, user.clone());
        self.navigate(NavigationIntent::Chat);
        Ok(user)
    }

    /// Verifies credentials and signs the user in.
    ///
    /// The display name comes from the profile document when one exists,
    /// falling back to gateway metadata and finally `"Anonymous"`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] before any backend call when a
    /// field is missing or malformed, [`AuthError::Gateway`] with
    /// [`GatewayError::InvalidCredentials`] on mismatch, and
    /// [`AuthError::ProfileStore`] if the profile read fails.
    ///
    /// [`GatewayError::InvalidCredentials`]: crate::session::error::GatewayError::InvalidCredentials
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        validation::validate_login_fields(email, password)?;

        let identity = self.gateway.verify_credentials(email, password).await?;
        let profile = self.profiles.get(identity.uid()).await?;

        let user = CurrentUser::resolve(&identity, profile.as_ref());
        info!(uid = %user.uid(), "signed in");
        apply_sign_in(&self.state, &self.events, user.clone());
        self.navigate(NavigationIntent::Chat);
        Ok(user)
    }

    /// Signs in via the federated provider.
    ///
    /// First-time federated users get a profile document created from
    /// the provider-supplied name; returning users keep the profile they
    /// already have; calling this twice for the same account never
    /// creates two documents.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Gateway`] with
    /// [`GatewayError::FederatedLogin`] on cancellation or provider
    /// error, and [`AuthError::ProfileStore`] if the profile read or
    /// first-time write fails.
    ///
    /// [`GatewayError::FederatedLogin`]: crate::session::error::GatewayError::FederatedLogin
    pub async fn login_with_google(&self) -> Result<CurrentUser, AuthError> {
        let identity = self.gateway.federated_login().await?;

        let profile = match self.profiles.get(identity.uid()).await? {
            Some(existing) => existing,
            None => {
                let display_name = identity
                    .display_name()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(DEFAULT_DISPLAY_NAME);
                let fresh = Profile::new(
                    identity.uid(),
                    identity.email(),
                    display_name,
                    self.clock.as_ref(),
                );
                self.profiles.put(&fresh).await?;
                fresh
            }
        };

        let user = CurrentUser::resolve(&identity, Some(&profile));
        info!(uid = %user.uid(), "signed in via federated provider");
        apply_sign_in(&self.state, &self.events, user.clone());
        self.navigate(NavigationIntent::Chat);
        Ok(user)
    }

    /// Invalidates the session and clears the current user.
    ///
    /// Emits [`SessionEvent::SignedOut`]; consumers drop any cached
    /// query state on that event.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Gateway`] if the gateway cannot be reached.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.gateway.invalidate_session().await?;
        info!("signed out");
        apply_sign_out(&self.state, &self.events);
        Ok(())
    }

    fn navigate(&self, intent: NavigationIntent) {
        drop(self.events.send(SessionEvent::Navigate(intent)));
    }
}

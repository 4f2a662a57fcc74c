//! In-memory implementations of the session ports.
//!
//! Provide a process-local identity service and profile store for unit
//! testing and local use, without any hosted backend. Thread-safe via
//! internal [`RwLock`]s; live session changes flow through a tokio
//! broadcast channel.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::broadcast;

use crate::session::{
    domain::{Identity, Profile, UserId},
    error::{GatewayError, ProfileStoreError},
    ports::{
        identity_gateway::{
            CredentialPolicy, GatewayResult, IdentityGateway, SessionChange, SessionChanges,
        },
        profile_store::{ProfileResult, ProfileStore},
    },
};

/// Capacity of the session-change broadcast channel.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// What the federated provider pop-up would return for this process.
///
/// Configured on [`InMemoryIdentityGateway`] before calling
/// `federated_login`; with nothing configured, federated login behaves as
/// if the user dismissed the pop-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedAccount {
    /// The provider-side account email.
    pub email: String,
    /// The provider-supplied display name, if any.
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
struct AccountRecord {
    uid: UserId,
    display_name: Option<String>,
    /// SHA-256 digest of the password; `None` for federated-only accounts.
    password_digest: Option<[u8; 32]>,
}

fn digest_password(password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

fn lock_error(context: &str) -> std::io::Error {
    std::io::Error::other(format!("lock poisoned: {context}"))
}

/// In-memory implementation of [`IdentityGateway`].
///
/// Accounts are keyed by email; passwords are stored as SHA-256 digests,
/// never plaintext. Every successful sign-in and invalidation is
/// announced on the session-change stream, mirroring a hosted gateway's
/// auth-state listener.
pub struct InMemoryIdentityGateway {
    accounts: Arc<RwLock<HashMap<String, AccountRecord>>>,
    current: Arc<RwLock<Option<Identity>>>,
    changes: broadcast::Sender<SessionChange>,
    federated: Arc<RwLock<Option<FederatedAccount>>>,
    policy: CredentialPolicy,
}

impl InMemoryIdentityGateway {
    /// Creates an empty gateway with the default credential policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(CredentialPolicy::default())
    }

    /// Creates an empty gateway with a custom credential policy.
    #[must_use]
    pub fn with_policy(policy: CredentialPolicy) -> Self {
        let (changes, _rx) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            current: Arc::new(RwLock::new(None)),
            changes,
            federated: Arc::new(RwLock::new(None)),
            policy,
        }
    }

    /// Configures what the federated provider returns for this process.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if internal state is
    /// poisoned.
    pub fn set_federated_account(&self, account: FederatedAccount) -> GatewayResult<()> {
        let mut federated = self
            .federated
            .write()
            .map_err(|_| GatewayError::unavailable(lock_error("federated account")))?;
        *federated = Some(account);
        Ok(())
    }

    /// Returns the currently signed-in identity, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if internal state is
    /// poisoned.
    pub fn current_identity(&self) -> GatewayResult<Option<Identity>> {
        let current = self
            .current
            .read()
            .map_err(|_| GatewayError::unavailable(lock_error("current identity")))?;
        Ok(current.clone())
    }

    /// Returns the number of registered accounts.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.read().map_or(0, |accounts| accounts.len())
    }

    fn sign_in(&self, identity: &Identity) -> GatewayResult<()> {
        let mut current = self
            .current
            .write()
            .map_err(|_| GatewayError::unavailable(lock_error("current identity")))?;
        *current = Some(identity.clone());
        drop(current);

        self.announce(SessionChange::SignedIn(identity.clone()));
        Ok(())
    }

    fn announce(&self, change: SessionChange) {
        // A send error only means no subscriber is listening yet.
        drop(self.changes.send(change));
    }
}

/// Note: the default gateway starts with no accounts and no federated
/// provider configured.
impl Default for InMemoryIdentityGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityGateway for InMemoryIdentityGateway {
    async fn verify_credentials(&self, email: &str, password: &str) -> GatewayResult<Identity> {
        let identity = {
            let accounts = self
                .accounts
                .read()
                .map_err(|_| GatewayError::unavailable(lock_error("accounts")))?;

            let account = accounts.get(email).ok_or(GatewayError::InvalidCredentials)?;
            let digest = digest_password(password);
            if account.password_digest != Some(digest) {
                return Err(GatewayError::InvalidCredentials);
            }

            Identity::new(account.uid, email, account.display_name.clone())
        };

        self.sign_in(&identity)?;
        Ok(identity)
    }

    async fn create_identity(&self, email: &str, password: &str) -> GatewayResult<Identity> {
        self.policy.check(password)?;

        let identity = {
            let mut accounts = self
                .accounts
                .write()
                .map_err(|_| GatewayError::unavailable(lock_error("accounts")))?;

            if accounts.contains_key(email) {
                return Err(GatewayError::IdentityConflict(email.to_owned()));
            }

            let record = AccountRecord {
                uid: UserId::new(),
                display_name: None,
                password_digest: Some(digest_password(password)),
            };
            let identity = Identity::new(record.uid, email, None);
            accounts.insert(email.to_owned(), record);
            identity
        };

        self.sign_in(&identity)?;
        Ok(identity)
    }

    async fn update_display_name(&self, uid: UserId, display_name: &str) -> GatewayResult<()> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| GatewayError::unavailable(lock_error("accounts")))?;

        let record = accounts
            .values_mut()
            .find(|record| record.uid == uid)
            .ok_or_else(|| {
                GatewayError::unavailable(std::io::Error::other(format!(
                    "no identity for uid {uid}"
                )))
            })?;
        record.display_name = Some(display_name.to_owned());
        drop(accounts);

        let mut current = self
            .current
            .write()
            .map_err(|_| GatewayError::unavailable(lock_error("current identity")))?;
        if let Some(identity) = current.as_mut() {
            if identity.uid() == uid {
                *identity = Identity::new(uid, identity.email(), Some(display_name.to_owned()));
            }
        }

        Ok(())
    }

    async fn federated_login(&self) -> GatewayResult<Identity> {
        let account = {
            let federated = self
                .federated
                .read()
                .map_err(|_| GatewayError::unavailable(lock_error("federated account")))?;
            federated
                .clone()
                .ok_or_else(|| GatewayError::federated("cancelled by user"))?
        };

        let identity = {
            let mut accounts = self
                .accounts
                .write()
                .map_err(|_| GatewayError::unavailable(lock_error("accounts")))?;

            let record = accounts
                .entry(account.email.clone())
                .or_insert_with(|| AccountRecord {
                    uid: UserId::new(),
                    display_name: account.display_name.clone(),
                    password_digest: None,
                });
            // Returning users keep their original uid; the provider's
            // current display name always wins in gateway metadata.
            record.display_name = account.display_name.clone();
            Identity::new(record.uid, account.email.clone(), record.display_name.clone())
        };

        self.sign_in(&identity)?;
        Ok(identity)
    }

    async fn invalidate_session(&self) -> GatewayResult<()> {
        let mut current = self
            .current
            .write()
            .map_err(|_| GatewayError::unavailable(lock_error("current identity")))?;
        *current = None;
        drop(current);

        self.announce(SessionChange::SignedOut);
        Ok(())
    }

    fn session_changes(&self) -> SessionChanges {
        // Subscribe before reading the current state so a transition
        // landing in between is delivered rather than lost.
        let rx = self.changes.subscribe();
        let initial = self.current.read().map_or(SessionChange::SignedOut, |current| {
            current
                .clone()
                .map_or(SessionChange::SignedOut, SessionChange::SignedIn)
        });
        SessionChanges::new(initial, rx)
    }
}

/// In-memory implementation of [`ProfileStore`].
///
/// Thread-safe via internal [`RwLock`]. Suitable for unit tests and
/// local use.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.read().map_or(0, |profiles| profiles.len())
    }

    /// Returns `true` if no profiles are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, uid: UserId) -> ProfileResult<Option<Profile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| ProfileStoreError::unavailable(lock_error("profiles")))?;
        Ok(profiles.get(&uid).cloned())
    }

    async fn put(&self, profile: &Profile) -> ProfileResult<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| ProfileStoreError::unavailable(lock_error("profiles")))?;
        profiles.insert(profile.uid(), profile.clone());
        Ok(())
    }
}

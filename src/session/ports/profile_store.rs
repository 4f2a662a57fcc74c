//! Profile Store port.
//!
//! The Profile Store is an external document collection holding one
//! profile per user, keyed by the gateway-issued [`UserId`].

use crate::session::{
    domain::{Profile, UserId},
    error::ProfileStoreError,
};
use async_trait::async_trait;

/// Result type for profile store operations.
pub type ProfileResult<T> = Result<T, ProfileStoreError>;

/// Port for profile document persistence.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - at most one profile exists per [`UserId`]
/// - `put` overwrites an existing document for the same user
/// - concurrent access is handled safely
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the profile for a user.
    ///
    /// Returns `None` if no profile document has been written yet.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError` if the store cannot be reached or the
    /// document cannot be decoded.
    async fn get(&self, uid: UserId) -> ProfileResult<Option<Profile>>;

    /// Writes (or overwrites) the profile document for its user.
    ///
    /// # Errors
    ///
    /// Returns `ProfileStoreError` if the store cannot be reached or the
    /// document cannot be encoded.
    async fn put(&self, profile: &Profile) -> ProfileResult<()>;
}

//! Message Store port.
//!
//! The Message Store is the external append-only collection holding the
//! shared room's messages, readable via a live ordered subscription.

use crate::feed::{
    domain::{FeedSnapshot, MessageDraft, MessageId},
    error::MessageStoreError,
};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Result type for message store operations.
pub type StoreResult<T> = Result<T, MessageStoreError>;

/// Live, ordered subscription onto the Message Store.
///
/// Delivers the full current snapshot immediately, then the full list
/// again after every change, never a diff. Dropping the subscription
/// (or calling [`FeedSubscription::close`]) tears it down; callers must
/// close on teardown to avoid leaking it.
#[must_use]
pub struct FeedSubscription {
    pending: Option<FeedSnapshot>,
    rx: broadcast::Receiver<FeedSnapshot>,
}

impl FeedSubscription {
    /// Creates a subscription that yields `initial` first, then live
    /// snapshots from `rx`.
    pub const fn new(initial: FeedSnapshot, rx: broadcast::Receiver<FeedSnapshot>) -> Self {
        Self {
            pending: Some(initial),
            rx,
        }
    }

    /// Waits for the next snapshot.
    ///
    /// Returns `None` once the store has shut down. A slow consumer that
    /// misses intermediate snapshots skips ahead; every snapshot is
    /// complete, so only the latest matters.
    pub async fn next_snapshot(&mut self) -> Option<FeedSnapshot> {
        if let Some(snapshot) = self.pending.take() {
            return Some(snapshot);
        }

        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Tears the subscription down, releasing the store-side slot.
    pub fn close(self) {
        drop(self);
    }
}

/// Port for the external message collection.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - the write timestamp is assigned by the store, strictly monotonic
///   per store instance
/// - every append is followed by a full snapshot on all open
///   subscriptions
/// - `append` completes independently of snapshot delivery
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Appends a message, assigning its identifier and timestamp.
    ///
    /// # Errors
    ///
    /// Returns `MessageStoreError` if the store cannot be reached.
    async fn append(&self, draft: &MessageDraft) -> StoreResult<MessageId>;

    /// Opens a live subscription ordered ascending by timestamp.
    fn subscribe_ordered(&self) -> FeedSubscription;
}

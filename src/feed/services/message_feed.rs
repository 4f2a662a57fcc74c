//! Message feed service: the ordered message list and the send path.
//!
//! Maintains an in-memory copy of the room's messages, kept current by a
//! pump driving the store subscription, and exposes a guarded send
//! operation tagged with the signed-in user's identity.

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::feed::{
    domain::{FeedSnapshot, MessageDraft, MessageId},
    error::SendError,
    ports::message_store::MessageStore,
};
use crate::session::services::SessionView;

/// Capacity of the re-broadcast snapshot channel.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 32;

/// Handle for the long-lived feed pump.
///
/// Returned by [`MessageFeed::subscribe`]. The pump (and the store
/// subscription it drives) runs until the guard is closed or dropped;
/// the owning UI context must close it on teardown.
#[must_use = "dropping the guard tears the feed subscription down"]
pub struct FeedListenerGuard {
    handle: JoinHandle<()>,
}

impl FeedListenerGuard {
    /// Tears the pump and its store subscription down.
    pub fn close(self) {
        drop(self);
    }

    /// Returns `true` once the pump task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for FeedListenerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The live message list for the shared room.
///
/// # Example
///
/// ```ignore
/// let feed = MessageFeed::new(store, manager.view());
/// let listener = feed.subscribe();
///
/// let id = feed.send("hello, room").await?;
/// // The feed reflects the append once the subscription fires;
/// // send's own completion never waits for that.
///
/// listener.close();
/// ```
pub struct MessageFeed<M>
where
    M: MessageStore + 'static,
{
    store: Arc<M>,
    session: SessionView,
    messages: Arc<RwLock<FeedSnapshot>>,
    snapshots: broadcast::Sender<FeedSnapshot>,
}

impl<M> MessageFeed<M>
where
    M: MessageStore + 'static,
{
    /// Creates a feed over `store`, attributing sends to whoever the
    /// session view reports as signed in.
    #[must_use]
    pub fn new(store: Arc<M>, session: SessionView) -> Self {
        let (snapshots, _rx) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            store,
            session,
            messages: Arc::new(RwLock::new(FeedSnapshot::default())),
            snapshots,
        }
    }

    /// Starts the pump that keeps the in-memory list current.
    ///
    /// Opens the store's ordered subscription and copies every snapshot
    /// into [`MessageFeed::messages`], re-broadcasting it to snapshot
    /// subscribers. The first snapshot (the room's current contents)
    /// arrives without waiting for a change.
    pub fn subscribe(&self) -> FeedListenerGuard {
        let mut subscription = self.store.subscribe_ordered();
        let messages = Arc::clone(&self.messages);
        let snapshots = self.snapshots.clone();

        let handle = tokio::spawn(async move {
            while let Some(snapshot) = subscription.next_snapshot().await {
                debug!(messages = snapshot.len(), "feed snapshot received");
                if let Ok(mut guard) = messages.write() {
                    *guard = snapshot.clone();
                }
                // A send error only means no subscriber is listening.
                drop(snapshots.send(snapshot));
            }
        });

        FeedListenerGuard { handle }
    }

    /// Returns the current ordered message list.
    #[must_use]
    pub fn messages(&self) -> FeedSnapshot {
        self.messages
            .read()
            .map_or_else(|_| FeedSnapshot::default(), |guard| guard.clone())
    }

    /// Subscribes to snapshots as the pump applies them.
    #[must_use]
    pub fn subscribe_snapshots(&self) -> broadcast::Receiver<FeedSnapshot> {
        self.snapshots.subscribe()
    }

    /// Sends a message to the room as the signed-in user.
    ///
    /// The store assigns the identifier and timestamp; completion does
    /// not wait for the subscription to deliver the new message back.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::EmptyMessage`] if the text trims to empty
    /// (no store call is made), [`SendError::NotAuthenticated`] if
    /// nobody is signed in, and [`SendError::Store`] if the append
    /// fails.
    pub async fn send(&self, text: &str) -> Result<MessageId, SendError> {
        if text.trim().is_empty() {
            return Err(SendError::EmptyMessage);
        }

        let Some(sender) = self.session.current_user() else {
            return Err(SendError::NotAuthenticated);
        };

        let draft = MessageDraft::new(text, sender.uid(), sender.display_name());
        let id = self.store.append(&draft).await?;
        debug!(message = %id, sender = %sender.uid(), "message appended");
        Ok(id)
    }
}

//! In-memory implementation of the Message Store port.
//!
//! A process-local append-only message collection with live ordered
//! subscriptions, for unit testing and local use. Thread-safe via an
//! internal [`RwLock`]; snapshots flow through a tokio broadcast
//! channel.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tokio::sync::broadcast;

use crate::feed::{
    domain::{ChatMessage, FeedSnapshot, MessageDraft, MessageId},
    error::MessageStoreError,
    ports::message_store::{FeedSubscription, MessageStore, StoreResult},
};

/// Capacity of the snapshot broadcast channel.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Default)]
struct Ledger {
    messages: Vec<ChatMessage>,
    last_timestamp: Option<DateTime<Utc>>,
}

/// In-memory implementation of [`MessageStore`].
///
/// Write timestamps come from the injected clock and are forced strictly
/// monotonic: an append that lands on or before the previous timestamp
/// is nudged one microsecond past it, so the ordering key is total even
/// under a frozen test clock.
pub struct InMemoryMessageStore<K>
where
    K: Clock + Send + Sync,
{
    ledger: Arc<RwLock<Ledger>>,
    updates: broadcast::Sender<FeedSnapshot>,
    clock: Arc<K>,
}

impl<K> InMemoryMessageStore<K>
where
    K: Clock + Send + Sync,
{
    /// Creates an empty store assigning timestamps from `clock`.
    #[must_use]
    pub fn new(clock: Arc<K>) -> Self {
        let (updates, _rx) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            ledger: Arc::new(RwLock::new(Ledger::default())),
            updates,
            clock,
        }
    }

    /// Returns the number of stored messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.ledger.read().map_or(0, |ledger| ledger.messages.len())
    }
}

#[async_trait]
impl<K> MessageStore for InMemoryMessageStore<K>
where
    K: Clock + Send + Sync,
{
    async fn append(&self, draft: &MessageDraft) -> StoreResult<MessageId> {
        let now = self.clock.utc();

        let (id, snapshot) = {
            let mut ledger = self.ledger.write().map_err(|_| {
                MessageStoreError::unavailable(std::io::Error::other("ledger lock poisoned"))
            })?;

            let timestamp = ledger.last_timestamp.map_or(now, |last| {
                if now > last {
                    now
                } else {
                    last.checked_add_signed(TimeDelta::microseconds(1))
                        .unwrap_or(now)
                }
            });

            let id = MessageId::new();
            ledger
                .messages
                .push(ChatMessage::from_draft(id, draft, timestamp));
            ledger.last_timestamp = Some(timestamp);

            (id, FeedSnapshot::new(ledger.messages.clone()))
        };

        // Append succeeds whether or not anyone is subscribed.
        drop(self.updates.send(snapshot));
        Ok(id)
    }

    fn subscribe_ordered(&self) -> FeedSubscription {
        // Subscribe before reading the ledger so an append landing in
        // between is delivered rather than lost.
        let rx = self.updates.subscribe();
        let initial = self
            .ledger
            .read()
            .map_or_else(|_| FeedSnapshot::default(), |ledger| {
                FeedSnapshot::new(ledger.messages.clone())
            });
        FeedSubscription::new(initial, rx)
    }
}

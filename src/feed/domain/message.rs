//! Messages in the shared room and the snapshots that carry them.

use super::MessageId;
use crate::session::domain::{DEFAULT_DISPLAY_NAME, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message as submitted by a sender, before the store has assigned an
/// identifier and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraft {
    /// The message text, non-empty by construction of the send path.
    text: String,

    /// Who is sending.
    sender_uid: UserId,

    /// The sender's display name at send time.
    sender_display_name: String,
}

impl MessageDraft {
    /// Creates a draft, substituting [`DEFAULT_DISPLAY_NAME`] for an
    /// empty display name.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        sender_uid: UserId,
        sender_display_name: impl Into<String>,
    ) -> Self {
        let mut sender_display_name = sender_display_name.into();
        if sender_display_name.is_empty() {
            sender_display_name = DEFAULT_DISPLAY_NAME.to_owned();
        }

        Self {
            text: text.into(),
            sender_uid,
            sender_display_name,
        }
    }

    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the sender's identifier.
    #[must_use]
    pub const fn sender_uid(&self) -> UserId {
        self.sender_uid
    }

    /// Returns the sender's display name.
    #[must_use]
    pub fn sender_display_name(&self) -> &str {
        &self.sender_display_name
    }
}

/// A message in the shared room.
///
/// Immutable once the store has accepted it: messages are never edited
/// or deleted, and the store-assigned timestamp is the ordering key for
/// the whole room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Store-assigned identifier.
    id: MessageId,

    /// The message text.
    text: String,

    /// Who sent it.
    sender_uid: UserId,

    /// The sender's display name at send time.
    sender_display_name: String,

    /// Store-assigned write timestamp; the ordering key.
    timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Assembles a stored message from a draft plus the store-assigned
    /// identifier and timestamp.
    #[must_use]
    pub fn from_draft(id: MessageId, draft: &MessageDraft, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            text: draft.text().to_owned(),
            sender_uid: draft.sender_uid(),
            sender_display_name: draft.sender_display_name().to_owned(),
            timestamp,
        }
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the sender's identifier.
    #[must_use]
    pub const fn sender_uid(&self) -> UserId {
        self.sender_uid
    }

    /// Returns the sender's display name.
    #[must_use]
    pub fn sender_display_name(&self) -> &str {
        &self.sender_display_name
    }

    /// Returns the store-assigned timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// The full ordered message list delivered on every subscription update.
///
/// Always the complete current contents of the room sorted ascending by
/// timestamp, never a delta.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedSnapshot {
    messages: Vec<ChatMessage>,
}

impl FeedSnapshot {
    /// Creates a snapshot, sorting the messages ascending by timestamp.
    #[must_use]
    pub fn new(mut messages: Vec<ChatMessage>) -> Self {
        messages.sort_by_key(ChatMessage::timestamp);
        Self { messages }
    }

    /// Returns the ordered messages.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the newest message, if any.
    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Returns the number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` when the room has no messages yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

//! Domain types for the message feed subsystem.
//!
//! Pure types with no infrastructure dependencies. Messages are
//! immutable once stored; snapshots are always complete and ordered.

mod ids;
mod message;

pub use ids::MessageId;
pub use message::{ChatMessage, FeedSnapshot, MessageDraft};

//! The live message feed for the shared room.
//!
//! This module owns the ordered message list: a live subscription onto
//! the Message Store keeps an in-memory snapshot current, and the send
//! path appends messages tagged with the signed-in user's identity.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure feed types ([`domain::ChatMessage`], [`domain::FeedSnapshot`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::message_store::MessageStore`])
//! - **Adapters**: Concrete implementations ([`adapters::memory::InMemoryMessageStore`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use palaver::feed::adapters::memory::InMemoryMessageStore;
//! use palaver::feed::domain::MessageDraft;
//! use palaver::feed::ports::message_store::MessageStore;
//! use palaver::session::domain::UserId;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = InMemoryMessageStore::new(Arc::new(DefaultClock));
//! let mut subscription = store.subscribe_ordered();
//!
//! let empty = subscription.next_snapshot().await.expect("initial snapshot");
//! assert!(empty.is_empty());
//!
//! let draft = MessageDraft::new("hello, room", UserId::new(), "alice");
//! store.append(&draft).await.expect("append should succeed");
//!
//! let next = subscription.next_snapshot().await.expect("live snapshot");
//! assert_eq!(next.len(), 1);
//! subscription.close();
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

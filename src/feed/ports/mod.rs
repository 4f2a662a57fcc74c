//! Port trait definitions for the feed subsystem.

pub mod message_store;

pub use message_store::{FeedSubscription, MessageStore, StoreResult};

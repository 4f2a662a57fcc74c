//! Application services for the feed subsystem.

mod message_feed;

pub use message_feed::{FeedListenerGuard, MessageFeed};

//! Behavioural integration tests for the shared chat room.
//!
//! These tests wire the session manager and the message feed together
//! over the in-memory backends, covering the full send/receive flow and
//! the ordering guarantees of the store-assigned timestamps.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use palaver::feed::{
    adapters::memory::InMemoryMessageStore,
    domain::FeedSnapshot,
    error::SendError,
    ports::message_store::{FeedSubscription, MessageStore},
    services::MessageFeed,
};
use palaver::session::{
    adapters::memory::{InMemoryIdentityGateway, InMemoryProfileStore},
    services::SessionManager,
};
use tokio::time::timeout;

type MemoryManager = SessionManager<InMemoryIdentityGateway, InMemoryProfileStore, DefaultClock>;
type MemoryStore = InMemoryMessageStore<DefaultClock>;

/// One chat client: its own identity gateway and session, sharing the
/// room's message store and profile store with everyone else.
struct Client {
    manager: MemoryManager,
    feed: MessageFeed<MemoryStore>,
}

impl Client {
    fn join(store: &Arc<MemoryStore>, profiles: &Arc<InMemoryProfileStore>) -> Self {
        let manager = SessionManager::new(
            Arc::new(InMemoryIdentityGateway::new()),
            Arc::clone(profiles),
            Arc::new(DefaultClock),
        );
        let feed = MessageFeed::new(Arc::clone(store), manager.view());
        Self { manager, feed }
    }
}

async fn next_snapshot(subscription: &mut FeedSubscription) -> FeedSnapshot {
    timeout(Duration::from_secs(5), subscription.next_snapshot())
        .await
        .expect("timed out waiting for a snapshot")
        .expect("snapshot stream closed")
}

/// The core scenario: register, send, and watch the message come back
/// through the subscription with the sender's identity attached.
#[tokio::test]
async fn registered_user_sends_and_the_feed_reflects_it() {
    let store = Arc::new(InMemoryMessageStore::new(Arc::new(DefaultClock)));
    let profiles = Arc::new(InMemoryProfileStore::new());
    let client = Client::join(&store, &profiles);

    let user = client
        .manager
        .register("a@x.com", "secret1", "alice")
        .await
        .expect("registration should succeed");
    assert_eq!(user.display_name(), "alice");

    let mut subscription = store.subscribe_ordered();
    let before = next_snapshot(&mut subscription).await;

    client.feed.send("hi").await.expect("send should succeed");

    let after = next_snapshot(&mut subscription).await;
    assert_eq!(after.len(), before.len() + 1);

    let message = after.last().expect("message stored");
    assert_eq!(message.text(), "hi");
    assert_eq!(message.sender_uid(), user.uid());
    assert_eq!(message.sender_display_name(), "alice");

    subscription.close();
}

/// Blank messages and signed-out sends are rejected without touching
/// the store.
#[tokio::test]
async fn guarded_sends_never_reach_the_store() {
    let store = Arc::new(InMemoryMessageStore::new(Arc::new(DefaultClock)));
    let profiles = Arc::new(InMemoryProfileStore::new());
    let client = Client::join(&store, &profiles);

    client
        .manager
        .register("a@x.com", "secret1", "alice")
        .await
        .expect("registration should succeed");

    assert!(matches!(
        client.feed.send("").await,
        Err(SendError::EmptyMessage)
    ));
    assert!(matches!(
        client.feed.send("   ").await,
        Err(SendError::EmptyMessage)
    ));

    client.manager.logout().await.expect("logout should succeed");
    assert!(matches!(
        client.feed.send("too late").await,
        Err(SendError::NotAuthenticated)
    ));

    assert_eq!(store.message_count(), 0);
}

/// Two clients in the same room observe the same total order, and each
/// client's live feed converges on the store's contents.
#[tokio::test]
async fn two_clients_converge_on_one_ordered_history() {
    let store = Arc::new(InMemoryMessageStore::new(Arc::new(DefaultClock)));
    let profiles = Arc::new(InMemoryProfileStore::new());

    let alice = Client::join(&store, &profiles);
    let bob = Client::join(&store, &profiles);

    alice
        .manager
        .register("alice@x.com", "secret1", "alice")
        .await
        .expect("alice registers");
    bob.manager
        .register("bob@x.com", "secret2", "bob")
        .await
        .expect("bob registers");

    let mut bob_snapshots = bob.feed.subscribe_snapshots();
    let bob_listener = bob.feed.subscribe();

    // Drain bob's initial empty snapshot.
    let initial = timeout(Duration::from_secs(5), bob_snapshots.recv())
        .await
        .expect("timed out waiting for the initial snapshot")
        .expect("snapshot channel closed");
    assert!(initial.is_empty());

    alice.feed.send("hello bob").await.expect("alice sends");
    let first = timeout(Duration::from_secs(5), bob_snapshots.recv())
        .await
        .expect("timed out waiting for alice's message")
        .expect("snapshot channel closed");
    assert_eq!(first.len(), 1);

    bob.feed.send("hello alice").await.expect("bob sends");
    let second = timeout(Duration::from_secs(5), bob_snapshots.recv())
        .await
        .expect("timed out waiting for bob's message")
        .expect("snapshot channel closed");

    let names: Vec<&str> = second
        .messages()
        .iter()
        .map(|m| m.sender_display_name())
        .collect();
    assert_eq!(names, vec!["alice", "bob"]);

    // Bob's in-memory list matches what the store delivered.
    assert_eq!(bob.feed.messages(), second);

    // Timestamps are the ordering key and strictly increase.
    let timestamps: Vec<_> = second.messages().iter().map(|m| m.timestamp()).collect();
    assert!(
        timestamps
            .windows(2)
            .all(|pair| pair.first().zip(pair.last()).is_some_and(|(a, b)| a < b))
    );

    bob_listener.close();
}

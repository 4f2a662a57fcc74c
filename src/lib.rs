//! Palaver: the session and feed core of a shared-room chat client.
//!
//! This crate provides the non-UI logic of a minimal real-time chat
//! client: authentication-state lifecycle over an external identity
//! service, and a live, ordered message feed over an external document
//! store. The Presentation Layer and the backend implementations are
//! both out of scope: the backends are reached through port traits,
//! with in-memory adapters included for tests and local use.
//!
//! # Architecture
//!
//! Palaver follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the external collaborators
//! - **Adapters**: Concrete implementations of ports (in-memory)
//! - **Services**: The two pieces of business logic this client owns
//!
//! # Modules
//!
//! - [`session`]: who is logged in; registration, login, federated
//!   login, logout, and live session restoration
//! - [`feed`]: the shared room's ordered message list and the send path

pub mod feed;
pub mod session;

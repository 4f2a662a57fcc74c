//! Session lifecycle for the chat client.
//!
//! This module owns "who is logged in": the session manager bridges
//! Identity Gateway notifications into application state and
//! orchestrates registration, login, federated login, and logout.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure session types ([`domain::Identity`], [`domain::Profile`], [`domain::SessionState`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::identity_gateway::IdentityGateway`], [`ports::profile_store::ProfileStore`])
//! - **Adapters**: Concrete implementations ([`adapters::memory::InMemoryIdentityGateway`], [`adapters::memory::InMemoryProfileStore`])
//! - **Validation**: Field rules enforced before any backend call
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use palaver::session::adapters::memory::{InMemoryIdentityGateway, InMemoryProfileStore};
//! use palaver::session::services::SessionManager;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let manager = SessionManager::new(
//!     Arc::new(InMemoryIdentityGateway::new()),
//!     Arc::new(InMemoryProfileStore::new()),
//!     Arc::new(DefaultClock),
//! );
//!
//! let user = manager
//!     .register("a@example.com", "secret1", "alice")
//!     .await
//!     .expect("registration should succeed");
//! assert_eq!(user.display_name(), "alice");
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;

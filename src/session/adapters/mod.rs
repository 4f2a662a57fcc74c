//! Adapter implementations of the session ports.

pub mod memory;

pub use memory::{FederatedAccount, InMemoryIdentityGateway, InMemoryProfileStore};

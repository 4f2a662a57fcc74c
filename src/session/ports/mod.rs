//! Port trait definitions for the session subsystem.
//!
//! Ports define the abstract interfaces the session manager requires from
//! the external identity and profile services. Adapters implement these
//! ports to connect the domain to concrete backends.

pub mod identity_gateway;
pub mod profile_store;

pub use identity_gateway::{
    CredentialPolicy, GatewayResult, IdentityGateway, SessionChange, SessionChanges,
};
pub use profile_store::{ProfileResult, ProfileStore};

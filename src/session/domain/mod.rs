//! Domain types for the session subsystem.
//!
//! Pure types with no infrastructure dependencies. All types are
//! serialisable via serde; identity and profile records are immutable
//! after construction.

mod identity;
mod ids;
mod profile;
mod session;

pub use identity::Identity;
pub use ids::UserId;
pub use profile::{DEFAULT_DISPLAY_NAME, Profile};
pub use session::{CurrentUser, NavigationIntent, SessionEvent, SessionState};

//! Shared helpers for feed tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Clock pinned to a single instant, for exercising the store's
/// monotonic-timestamp handling.
pub struct FrozenClock(DateTime<Utc>);

impl FrozenClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

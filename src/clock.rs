//! Time source used to stamp transactions.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Services never read the wall clock directly so tests can pin timestamps.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

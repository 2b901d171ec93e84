//! Clock implementations.
//!
//! `SystemClock` for production; `ManualClock` for tests and development,
//! where time only moves when told to.

use chrono::Duration;
use std::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time, UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that stands still until advanced.
///
/// Intended for tests and single-process development tooling; share it via
/// `Arc` with the ledgers under test and drive time from the test body.
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<Timestamp>,
}

impl ManualClock {
    /// Creates a clock pinned at the given instant.
    pub fn starting_at(instant: Timestamp) -> Self {
        Self {
            current: RwLock::new(instant),
        }
    }

    /// Moves the clock forward (or backward, with a negative duration).
    pub fn advance(&self, delta: Duration) {
        let mut current = self.current.write().expect("clock lock poisoned");
        *current = current.add(delta);
    }

    /// Pins the clock to a specific instant.
    pub fn set(&self, instant: Timestamp) {
        *self.current.write().expect("clock lock poisoned") = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read().expect("clock lock poisoned")
    }
}

//! Clock port - injectable source of current time.
//!
//! The ledgers never call `Utc::now()` directly; time comes in through this
//! seam so tests can pin or advance it.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

/// Source of the current instant and the current UTC calendar date.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;

    /// The current UTC calendar date.
    ///
    /// Derived from `now` so the two can never disagree within one call.
    fn today(&self) -> NaiveDate {
        self.now().date_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PinnedClock(Timestamp);

    impl Clock for PinnedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    #[test]
    fn today_is_derived_from_now() {
        // 2024-01-15T23:59:59Z
        let clock = PinnedClock(Timestamp::from_unix_secs(1705363199));
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn Clock) {}
    }
}

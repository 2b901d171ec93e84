//! UsageStore port - durable storage for quota and trial counters.
//!
//! Two record families: `DailyQuota` keyed by (user, UTC date) and a single
//! `TrialState` per user. Both are created lazily on first touch; neither is
//! ever deleted by the core logic.
//!
//! Implementations must be safe for concurrent use. Mutations are expressed
//! as single logical updates (increment, wholesale reset, guarded consume)
//! rather than read-modify-write of whole records, so an implementation can
//! make each one atomic.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::access::{DailyQuota, QuotaFeature, TrialFeature, TrialState};
use crate::domain::foundation::{Timestamp, UserId};

/// Port for persisting usage counters.
///
/// Implementations may store records in PostgreSQL or memory.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Fetches the daily record for (user, date), creating a zeroed one if
    /// absent. Never increments anything.
    async fn get_or_create_daily(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<DailyQuota, StoreError>;

    /// Adds `amount` to one feature counter for (user, date), creating the
    /// record if absent. Performs no limit check.
    async fn add_daily_usage(
        &self,
        user_id: UserId,
        date: NaiveDate,
        feature: QuotaFeature,
        amount: u32,
    ) -> Result<(), StoreError>;

    /// Fetches the user's trial record, creating one with
    /// `last_reset_at = now` and zero usage if absent.
    async fn get_or_create_trial(
        &self,
        user_id: UserId,
        now: Timestamp,
    ) -> Result<TrialState, StoreError>;

    /// Advances `last_reset_at` to `now` and zeroes every trial counter as
    /// one update.
    async fn reset_trial(&self, user_id: UserId, now: Timestamp) -> Result<(), StoreError>;

    /// Atomically increments a trial counter iff it is below `cap`.
    ///
    /// Returns whether the increment happened. The record is created first
    /// if absent (with `now` as the window start).
    async fn consume_trial(
        &self,
        user_id: UserId,
        feature: TrialFeature,
        cap: u32,
        now: Timestamp,
    ) -> Result<bool, StoreError>;
}

/// Errors from the usage store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error.
    #[error("database error: {0}")]
    Database(String),

    /// A persisted record failed to map back into a domain value.
    #[error("corrupt record for user {user_id}: {reason}")]
    CorruptRecord { user_id: i64, reason: String },
}

//! In-memory usage store for testing and single-server deployments.
//!
//! Both record families live in HashMaps behind a tokio RwLock. Every
//! mutation runs under one write-lock acquisition, so consume's
//! check-and-increment is atomic here, matching the guarded single-statement
//! UPDATE of the Postgres implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::access::{DailyQuota, QuotaCounters, QuotaFeature, TrialFeature, TrialState};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{StoreError, UsageStore};

/// Usage store backed by process memory.
///
/// Not suitable for multi-server deployments; counters vanish on restart.
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    daily: Arc<RwLock<HashMap<(UserId, NaiveDate), QuotaCounters>>>,
    trials: Arc<RwLock<HashMap<UserId, TrialState>>>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of daily rows currently stored, across all users and dates.
    ///
    /// Test hook for asserting the sparse-creation behavior.
    pub async fn daily_row_count(&self) -> usize {
        self.daily.read().await.len()
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn get_or_create_daily(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<DailyQuota, StoreError> {
        let mut daily = self.daily.write().await;
        let counters = daily.entry((user_id, date)).or_default();
        Ok(DailyQuota {
            user_id,
            usage_date: date,
            counters: *counters,
        })
    }

    async fn add_daily_usage(
        &self,
        user_id: UserId,
        date: NaiveDate,
        feature: QuotaFeature,
        amount: u32,
    ) -> Result<(), StoreError> {
        let mut daily = self.daily.write().await;
        daily.entry((user_id, date)).or_default().add(feature, amount);
        Ok(())
    }

    async fn get_or_create_trial(
        &self,
        user_id: UserId,
        now: Timestamp,
    ) -> Result<TrialState, StoreError> {
        let mut trials = self.trials.write().await;
        let state = trials
            .entry(user_id)
            .or_insert_with(|| TrialState::new(user_id, now));
        Ok(state.clone())
    }

    async fn reset_trial(&self, user_id: UserId, now: Timestamp) -> Result<(), StoreError> {
        let mut trials = self.trials.write().await;
        let state = trials
            .entry(user_id)
            .or_insert_with(|| TrialState::new(user_id, now));
        state.last_reset_at = now;
        state.used = Default::default();
        Ok(())
    }

    async fn consume_trial(
        &self,
        user_id: UserId,
        feature: TrialFeature,
        cap: u32,
        now: Timestamp,
    ) -> Result<bool, StoreError> {
        let mut trials = self.trials.write().await;
        let state = trials
            .entry(user_id)
            .or_insert_with(|| TrialState::new(user_id, now));

        let used = state.used.get(feature);
        if used >= cap {
            return Ok(false);
        }
        state.used.set(feature, used + 1);
        Ok(true)
    }
}

//! Daily quota ledger for free features.
//!
//! Counters live in one sparse row per (user, UTC date); a new date simply
//! has no row yet, so day rollover is an implicit reset. The check and the
//! increment are deliberately separate operations: the quota is best-effort
//! metering of many small actions, and an overshoot-by-one under concurrent
//! requests is tolerated. Only "today" per the injected clock is ever
//! write-targeted.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::access::{DailyLimit, QuotaFeature, UserProfile};
use crate::ports::{Clock, PlanCatalog, StoreError, UsageStore};

/// Today's usage for one feature, paired with its resolved limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureUsage {
    pub used: u32,
    pub limit: DailyLimit,
}

/// Admission and recording for daily-reset free features.
pub struct QuotaLedger {
    store: Arc<dyn UsageStore>,
    catalog: Arc<dyn PlanCatalog>,
    clock: Arc<dyn Clock>,
}

impl QuotaLedger {
    pub fn new(
        store: Arc<dyn UsageStore>,
        catalog: Arc<dyn PlanCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            catalog,
            clock,
        }
    }

    /// Whether the user may perform one more use of `feature` today.
    ///
    /// Premium-equivalent users pass unconditionally, before any row or
    /// limit is consulted. May create today's row as a byproduct of the
    /// lookup; never increments anything. Store failures propagate: an
    /// admission decision must not be made on unknown state.
    pub async fn has_quota(
        &self,
        user: &UserProfile,
        feature: QuotaFeature,
    ) -> Result<bool, StoreError> {
        if user.is_premium_equivalent(self.clock.now()) {
            return Ok(true);
        }

        let quota = self
            .store
            .get_or_create_daily(user.id, self.clock.today())
            .await?;
        let used = quota.counters.get(feature);
        let limit = self.catalog.limit_for(user, feature);

        let has_remaining = limit.permits(used);
        if !has_remaining {
            info!(
                user_id = %user.id,
                feature = %feature,
                used,
                limit = %limit,
                "daily quota exhausted"
            );
        }

        Ok(has_remaining)
    }

    /// Records `amount` uses of `feature` against today.
    ///
    /// Pure recording: no limit check, and a persistence failure is logged
    /// and swallowed so the user-visible action that already succeeded is
    /// never failed by its own metering.
    pub async fn increment(&self, user: &UserProfile, feature: QuotaFeature, amount: u32) {
        let today = self.clock.today();
        match self
            .store
            .add_daily_usage(user.id, today, feature, amount)
            .await
        {
            Ok(()) => {
                debug!(user_id = %user.id, feature = %feature, amount, "quota usage recorded");
            }
            Err(e) => {
                error!(
                    user_id = %user.id,
                    feature = %feature,
                    error = %e,
                    "failed to record quota usage"
                );
            }
        }
    }

    /// Today's usage and resolved limit for every quota feature.
    ///
    /// For profile and statistics display. Shares the get-or-create
    /// semantics of `has_quota` and mutates no counters, so repeated calls
    /// yield identical results.
    pub async fn quota_status(
        &self,
        user: &UserProfile,
    ) -> Result<BTreeMap<QuotaFeature, FeatureUsage>, StoreError> {
        let quota = self
            .store
            .get_or_create_daily(user.id, self.clock.today())
            .await?;

        Ok(QuotaFeature::ALL
            .into_iter()
            .map(|feature| {
                (
                    feature,
                    FeatureUsage {
                        used: quota.counters.get(feature),
                        limit: self.catalog.limit_for(user, feature),
                    },
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::StaticPlanCatalog;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::memory::InMemoryUsageStore;
    use crate::domain::access::{DailyLimits, LimitOverrides, Plan, PlanCode};
    use crate::domain::foundation::{Timestamp, UserId};
    use chrono::Duration;

    fn catalog() -> Arc<StaticPlanCatalog> {
        Arc::new(
            StaticPlanCatalog::new(vec![
                Plan::new(
                    PlanCode::Free,
                    "Free",
                    DailyLimits {
                        quick_chat: 30,
                        code_chat: 10,
                        convert: 5,
                        pptx: 2,
                    },
                ),
                Plan::new(
                    PlanCode::Premium,
                    "Premium",
                    DailyLimits {
                        quick_chat: 0,
                        code_chat: 0,
                        convert: 0,
                        pptx: 0,
                    },
                ),
            ])
            .unwrap(),
        )
    }

    fn ledger() -> (QuotaLedger, Arc<InMemoryUsageStore>, Arc<ManualClock>) {
        let store = Arc::new(InMemoryUsageStore::new());
        let clock = Arc::new(ManualClock::starting_at(Timestamp::from_unix_secs(
            1_700_000_000,
        )));
        let ledger = QuotaLedger::new(store.clone(), catalog(), clock.clone());
        (ledger, store, clock)
    }

    fn user() -> UserProfile {
        UserProfile::free(UserId::new(1001).unwrap())
    }

    #[tokio::test]
    async fn fresh_user_has_quota() {
        let (ledger, _, _) = ledger();
        assert!(ledger.has_quota(&user(), QuotaFeature::Pptx).await.unwrap());
    }

    #[tokio::test]
    async fn quota_exhausts_at_limit_and_resets_next_day() {
        let (ledger, _, clock) = ledger();
        let u = user();

        // free plan: daily_pptx = 2
        assert!(ledger.has_quota(&u, QuotaFeature::Pptx).await.unwrap());
        ledger.increment(&u, QuotaFeature::Pptx, 1).await;
        assert!(ledger.has_quota(&u, QuotaFeature::Pptx).await.unwrap());
        ledger.increment(&u, QuotaFeature::Pptx, 1).await;
        assert!(!ledger.has_quota(&u, QuotaFeature::Pptx).await.unwrap());

        clock.advance(Duration::days(1));
        assert!(ledger.has_quota(&u, QuotaFeature::Pptx).await.unwrap());
    }

    #[tokio::test]
    async fn unlimited_sentinel_never_exhausts() {
        let (ledger, _, _) = ledger();
        let mut u = user();
        u.overrides = LimitOverrides {
            convert: Some(0),
            ..LimitOverrides::none()
        };

        for _ in 0..50 {
            ledger.increment(&u, QuotaFeature::Convert, 1).await;
        }
        assert!(ledger.has_quota(&u, QuotaFeature::Convert).await.unwrap());
    }

    #[tokio::test]
    async fn override_wins_over_plan_default() {
        let (ledger, _, _) = ledger();
        let mut u = user();
        u.overrides = LimitOverrides {
            pptx: Some(1),
            ..LimitOverrides::none()
        };

        ledger.increment(&u, QuotaFeature::Pptx, 1).await;
        assert!(!ledger.has_quota(&u, QuotaFeature::Pptx).await.unwrap());
    }

    #[tokio::test]
    async fn premium_user_bypasses_counters() {
        let (ledger, _, clock) = ledger();
        let mut u = user();
        u.plan = PlanCode::Premium;
        u.premium_until = Some(clock.now().add_days(30));

        for _ in 0..100 {
            ledger.increment(&u, QuotaFeature::Pptx, 1).await;
        }
        assert!(ledger.has_quota(&u, QuotaFeature::Pptx).await.unwrap());
    }

    #[tokio::test]
    async fn admin_bypasses_even_a_zero_activity_misconfigured_limit() {
        let (ledger, store, _) = ledger();
        let mut u = user();
        u.is_admin = true;
        u.overrides = LimitOverrides {
            quick_chat: Some(0),
            ..LimitOverrides::none()
        };

        assert!(ledger.has_quota(&u, QuotaFeature::QuickChat).await.unwrap());
        // bypass happens before any row is touched
        assert_eq!(store.daily_row_count().await, 0);
    }

    #[tokio::test]
    async fn has_quota_creates_todays_row_without_incrementing() {
        let (ledger, store, _) = ledger();
        let u = user();

        ledger.has_quota(&u, QuotaFeature::CodeChat).await.unwrap();
        assert_eq!(store.daily_row_count().await, 1);

        let status = ledger.quota_status(&u).await.unwrap();
        assert_eq!(status[&QuotaFeature::CodeChat].used, 0);
    }

    #[tokio::test]
    async fn quota_status_is_idempotent_and_complete() {
        let (ledger, _, _) = ledger();
        let u = user();
        ledger.increment(&u, QuotaFeature::QuickChat, 3).await;

        let first = ledger.quota_status(&u).await.unwrap();
        let second = ledger.quota_status(&u).await.unwrap();
        assert_eq!(first, second);

        assert_eq!(first.len(), QuotaFeature::ALL.len());
        assert_eq!(first[&QuotaFeature::QuickChat].used, 3);
        assert_eq!(first[&QuotaFeature::QuickChat].limit.raw(), 30);
        assert_eq!(first[&QuotaFeature::Pptx].used, 0);
    }
}

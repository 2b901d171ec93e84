//! Admission facade - the single choke point for gated features.
//!
//! Every feature handler calls [`AccessGate::evaluate`] before performing a
//! gated action. The bypass rules come first: admins and active premium
//! subscribers are admitted before any counter or limit is consulted.

use std::sync::Arc;
use tracing::debug;

use crate::domain::access::{AccessDecision, AllowReason, DenyReason, GatedFeature, UserProfile};
use crate::ports::{Clock, StoreError};

use super::{QuotaLedger, TrialLedger};

/// Composes the two ledgers with the premium/admin bypass.
pub struct AccessGate {
    quota: QuotaLedger,
    trial: TrialLedger,
    clock: Arc<dyn Clock>,
}

impl AccessGate {
    pub fn new(quota: QuotaLedger, trial: TrialLedger, clock: Arc<dyn Clock>) -> Self {
        Self {
            quota,
            trial,
            clock,
        }
    }

    /// The daily-quota ledger, for recording usage and status display.
    pub fn quota(&self) -> &QuotaLedger {
        &self.quota
    }

    /// The trial ledger, for consuming uses and status display.
    pub fn trial(&self) -> &TrialLedger {
        &self.trial
    }

    /// Decides whether `user` may use `feature` right now.
    ///
    /// Order of evaluation:
    /// 1. Admin bypass.
    /// 2. Active-premium bypass.
    /// 3. Trial class: settle an elapsed window, then check remaining uses.
    ///    Daily class: check today's quota.
    ///
    /// Denials are values with a typed reason; only persistence failures
    /// surface as errors.
    pub async fn evaluate(
        &self,
        user: &UserProfile,
        feature: GatedFeature,
    ) -> Result<AccessDecision, StoreError> {
        if user.is_admin {
            return Ok(AccessDecision::Allowed(AllowReason::AdminBypass));
        }
        if user.is_premium(self.clock.now()) {
            return Ok(AccessDecision::Allowed(AllowReason::PremiumBypass));
        }

        let decision = match feature {
            GatedFeature::Trial(trial_feature) => {
                // settle a stale window before reading the counters
                self.trial.maybe_reset(user).await?;
                if self.trial.remaining(user, trial_feature).await? == 0 {
                    AccessDecision::Denied(DenyReason::TrialExhausted)
                } else {
                    AccessDecision::Allowed(AllowReason::TrialAvailable)
                }
            }
            GatedFeature::Daily(quota_feature) => {
                if self.quota.has_quota(user, quota_feature).await? {
                    AccessDecision::Allowed(AllowReason::QuotaAvailable)
                } else {
                    AccessDecision::Denied(DenyReason::QuotaExhausted)
                }
            }
        };

        debug!(user_id = %user.id, feature = %feature, ?decision, "access evaluated");
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::StaticPlanCatalog;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::memory::InMemoryUsageStore;
    use crate::domain::access::{
        DailyLimits, Plan, PlanCode, QuotaFeature, TrialFeature, TrialPolicy,
    };
    use crate::domain::foundation::{Timestamp, UserId};
    use chrono::Duration;

    fn gate() -> (AccessGate, Arc<ManualClock>) {
        let store: Arc<InMemoryUsageStore> = Arc::new(InMemoryUsageStore::new());
        let clock = Arc::new(ManualClock::starting_at(Timestamp::from_unix_secs(
            1_700_000_000,
        )));
        let catalog = Arc::new(
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
        );

        let quota = QuotaLedger::new(store.clone(), catalog, clock.clone());
        let trial = TrialLedger::new(store, clock.clone(), TrialPolicy::default());
        (AccessGate::new(quota, trial, clock.clone()), clock)
    }

    fn user() -> UserProfile {
        UserProfile::free(UserId::new(3003).unwrap())
    }

    #[tokio::test]
    async fn admin_is_allowed_for_both_classes_regardless_of_counters() {
        let (gate, _) = gate();
        let mut u = user();
        u.is_admin = true;

        let daily = gate
            .evaluate(&u, GatedFeature::Daily(QuotaFeature::Pptx))
            .await
            .unwrap();
        assert_eq!(daily, AccessDecision::Allowed(AllowReason::AdminBypass));

        let trial = gate
            .evaluate(&u, GatedFeature::Trial(TrialFeature::ImageGen))
            .await
            .unwrap();
        assert_eq!(trial, AccessDecision::Allowed(AllowReason::AdminBypass));
    }

    #[tokio::test]
    async fn active_premium_is_allowed_for_both_classes() {
        let (gate, clock) = gate();
        let mut u = user();
        u.premium_until = Some(clock.now().add_days(1));

        let daily = gate
            .evaluate(&u, GatedFeature::Daily(QuotaFeature::Convert))
            .await
            .unwrap();
        assert_eq!(daily, AccessDecision::Allowed(AllowReason::PremiumBypass));

        let trial = gate
            .evaluate(&u, GatedFeature::Trial(TrialFeature::Pptx))
            .await
            .unwrap();
        assert_eq!(trial, AccessDecision::Allowed(AllowReason::PremiumBypass));
    }

    #[tokio::test]
    async fn expired_premium_falls_through_to_the_ledgers() {
        let (gate, clock) = gate();
        let mut u = user();
        u.premium_until = Some(clock.now().add_days(-1));

        let decision = gate
            .evaluate(&u, GatedFeature::Trial(TrialFeature::ImageGen))
            .await
            .unwrap();
        assert_eq!(decision, AccessDecision::Allowed(AllowReason::TrialAvailable));
    }

    #[tokio::test]
    async fn exhausted_trial_is_denied_with_typed_reason() {
        let (gate, _) = gate();
        let u = user();

        for _ in 0..3 {
            assert!(gate.trial().consume(&u, TrialFeature::ImageGen).await.unwrap());
        }

        let decision = gate
            .evaluate(&u, GatedFeature::Trial(TrialFeature::ImageGen))
            .await
            .unwrap();
        assert_eq!(decision, AccessDecision::Denied(DenyReason::TrialExhausted));
    }

    #[tokio::test]
    async fn exhausted_quota_is_denied_with_typed_reason() {
        let (gate, _) = gate();
        let u = user();

        gate.quota().increment(&u, QuotaFeature::Pptx, 2).await;

        let decision = gate
            .evaluate(&u, GatedFeature::Daily(QuotaFeature::Pptx))
            .await
            .unwrap();
        assert_eq!(decision, AccessDecision::Denied(DenyReason::QuotaExhausted));
    }

    #[tokio::test]
    async fn evaluate_settles_an_elapsed_trial_window() {
        let (gate, clock) = gate();
        let u = user();

        for _ in 0..3 {
            gate.trial().consume(&u, TrialFeature::ImageGen).await.unwrap();
        }
        clock.advance(Duration::days(7));

        // no explicit maybe_reset by the caller; the gate settles the window
        let decision = gate
            .evaluate(&u, GatedFeature::Trial(TrialFeature::ImageGen))
            .await
            .unwrap();
        assert_eq!(decision, AccessDecision::Allowed(AllowReason::TrialAvailable));
    }

    #[tokio::test]
    async fn pptx_gates_independently_per_class() {
        let (gate, _) = gate();
        let u = user();

        // exhaust the daily pptx quota; the trial-class request still passes
        gate.quota().increment(&u, QuotaFeature::Pptx, 2).await;

        let daily = gate
            .evaluate(&u, GatedFeature::Daily(QuotaFeature::Pptx))
            .await
            .unwrap();
        assert!(daily.is_denied());

        let trial = gate
            .evaluate(&u, GatedFeature::Trial(TrialFeature::Pptx))
            .await
            .unwrap();
        assert!(trial.is_allowed());
    }
}

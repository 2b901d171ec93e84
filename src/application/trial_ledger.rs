//! Rolling trial ledger for premium features.
//!
//! A single record per user governs every trial feature: when the window
//! elapses, all counters reset wholesale. Unlike the daily quota,
//! consumption here is a hard cap on a small integer, so the enforcement is
//! inlined into the mutation itself (the store's guarded increment) rather
//! than split into check-then-record.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::access::{TrialFeature, TrialPolicy, UserProfile};
use crate::domain::foundation::Timestamp;
use crate::ports::{Clock, StoreError, UsageStore};

/// Display snapshot of one trial feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialFeatureStatus {
    pub used: u32,
    pub remaining: u32,
    pub total: u32,
}

/// Display snapshot of a user's whole trial window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialStatus {
    pub features: BTreeMap<TrialFeature, TrialFeatureStatus>,
    pub last_reset_at: Timestamp,
    /// Whole days until the window replenishes, rounded up, floored at 0.
    pub days_until_reset: i64,
}

/// Admission and recording for rolling-window premium trials.
pub struct TrialLedger {
    store: Arc<dyn UsageStore>,
    clock: Arc<dyn Clock>,
    policy: TrialPolicy,
}

impl TrialLedger {
    pub fn new(store: Arc<dyn UsageStore>, clock: Arc<dyn Clock>, policy: TrialPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// The policy this ledger enforces.
    pub fn policy(&self) -> &TrialPolicy {
        &self.policy
    }

    /// Resets the window if it has fully elapsed; returns whether it did.
    ///
    /// The reset zeroes every feature counter as one update, never a subset.
    /// Meant to be called once per user interaction before any trial check;
    /// redundant calls within the same instant are no-ops. Store failures
    /// propagate: this write is enforcement-critical.
    pub async fn maybe_reset(&self, user: &UserProfile) -> Result<bool, StoreError> {
        let now = self.clock.now();
        let state = self.store.get_or_create_trial(user.id, now).await?;

        if !state.window_elapsed(now, &self.policy) {
            return Ok(false);
        }

        self.store.reset_trial(user.id, now).await?;
        info!(
            user_id = %user.id,
            previous_reset = ?state.last_reset_at,
            "trial window reset"
        );
        Ok(true)
    }

    /// Remaining uses of `feature` in the current window.
    ///
    /// A pure read: no reset check, no mutation beyond lazily creating the
    /// record. A counter found above the cap is anomalous; it is clamped to
    /// zero remaining rather than wrapping.
    pub async fn remaining(
        &self,
        user: &UserProfile,
        feature: TrialFeature,
    ) -> Result<u32, StoreError> {
        let state = self
            .store
            .get_or_create_trial(user.id, self.clock.now())
            .await?;
        let used = state.used.get(feature);
        let cap = self.policy.uses_per_period;

        if used > cap {
            warn!(user_id = %user.id, feature = %feature, used, cap, "trial counter above cap");
        }

        Ok(cap.saturating_sub(used))
    }

    /// Consumes one trial use of `feature` if any remain.
    ///
    /// Check and increment happen as one guarded store operation, so the
    /// stored count can never pass the cap. Returns whether a use was
    /// consumed. Store failures propagate.
    pub async fn consume(
        &self,
        user: &UserProfile,
        feature: TrialFeature,
    ) -> Result<bool, StoreError> {
        let cap = self.policy.uses_per_period;
        let consumed = self
            .store
            .consume_trial(user.id, feature, cap, self.clock.now())
            .await?;

        if consumed {
            info!(user_id = %user.id, feature = %feature, "trial use consumed");
        } else {
            info!(user_id = %user.id, feature = %feature, cap, "no trial uses remaining");
        }

        Ok(consumed)
    }

    /// Full trial snapshot for display surfaces.
    pub async fn status(&self, user: &UserProfile) -> Result<TrialStatus, StoreError> {
        let now = self.clock.now();
        let state = self.store.get_or_create_trial(user.id, now).await?;
        let cap = self.policy.uses_per_period;

        let features = TrialFeature::ALL
            .into_iter()
            .map(|feature| {
                let used = state.used.get(feature);
                (
                    feature,
                    TrialFeatureStatus {
                        used,
                        remaining: cap.saturating_sub(used),
                        total: cap,
                    },
                )
            })
            .collect();

        let elapsed = now.duration_since(&state.last_reset_at);
        let left = self.policy.period() - elapsed;
        let days_until_reset = if left.num_seconds() <= 0 {
            0
        } else {
            // ceiling in whole days
            (left.num_seconds() + 86_399) / 86_400
        };

        Ok(TrialStatus {
            features,
            last_reset_at: state.last_reset_at,
            days_until_reset,
        })
    }
}

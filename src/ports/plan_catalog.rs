//! PlanCatalog port - immutable plan reference data.

use crate::domain::access::{DailyLimit, Plan, PlanCode, QuotaFeature, UserProfile};

/// Source of plan records and resolved daily limits.
///
/// Every `PlanCode` must have a record; a missing plan is a construction-time
/// configuration error in the implementation, so lookups here are infallible.
pub trait PlanCatalog: Send + Sync {
    /// The plan registered under a code.
    fn plan(&self, code: PlanCode) -> &Plan;

    /// Resolves the daily limit for (user, feature).
    ///
    /// A personal override wins over the plan default, and carries its own
    /// unlimited sentinel (`<= 0`).
    fn limit_for(&self, user: &UserProfile, feature: QuotaFeature) -> DailyLimit {
        user.overrides
            .get(feature)
            .unwrap_or_else(|| self.plan(user.plan).daily_limits.get(feature))
    }
}

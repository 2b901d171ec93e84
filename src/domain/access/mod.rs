//! Admission-control domain model.
//!
//! Everything the quota and trial ledgers reason about: the closed set of
//! gated features, subscription plans with their daily limits, the user
//! profile as seen by admission control, the two counter records, and the
//! typed access decision.

mod decision;
mod feature;
mod plan;
mod quota;
mod trial;
mod user;

pub use decision::{AccessDecision, AllowReason, DenyReason};
pub use feature::{GatedFeature, QuotaFeature, TrialFeature};
pub use plan::{DailyLimit, DailyLimits, Plan, PlanCode};
pub use quota::{DailyQuota, QuotaCounters};
pub use trial::{TrialCounters, TrialPolicy, TrialState};
pub use user::{LimitOverrides, UserProfile};

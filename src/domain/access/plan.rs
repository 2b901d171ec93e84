//! Subscription plans and their daily limits.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::QuotaFeature;

/// Subscription plan code.
///
/// Exactly one plan record must exist per code; a missing plan is a fatal
/// configuration error at startup, never a runtime fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanCode {
    /// Free tier - daily-capped features plus trial allowances.
    Free,
    /// Premium tier - bypasses both ledgers while the subscription is active.
    Premium,
}

impl PlanCode {
    /// Returns the display name for this plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanCode::Free => "Free",
            PlanCode::Premium => "Premium",
        }
    }
}

impl fmt::Display for PlanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A resolved daily limit for one feature.
///
/// The raw value keeps the configured sentinel semantics: zero or negative
/// means **unlimited**, not "always denied".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyLimit(i32);

impl DailyLimit {
    /// Wraps a raw configured limit.
    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw configured value, sentinel included.
    pub fn raw(&self) -> i32 {
        self.0
    }

    /// True when the limit imposes no ceiling.
    pub fn is_unlimited(&self) -> bool {
        self.0 <= 0
    }

    /// Whether a usage count is still under this limit.
    pub fn permits(&self, used: u32) -> bool {
        self.is_unlimited() || (used as i64) < self.0 as i64
    }
}

impl fmt::Display for DailyLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            write!(f, "unlimited")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// The per-feature daily limits configured for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLimits {
    pub quick_chat: i32,
    pub code_chat: i32,
    pub convert: i32,
    pub pptx: i32,
}

impl DailyLimits {
    /// Returns the configured limit for a feature.
    pub fn get(&self, feature: QuotaFeature) -> DailyLimit {
        let raw = match feature {
            QuotaFeature::QuickChat => self.quick_chat,
            QuotaFeature::CodeChat => self.code_chat,
            QuotaFeature::Convert => self.convert,
            QuotaFeature::Pptx => self.pptx,
        };
        DailyLimit::from_raw(raw)
    }
}

/// Immutable plan reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// The code this plan is registered under.
    pub code: PlanCode,
    /// Human-readable plan title.
    pub title: String,
    /// Daily limits per quota feature.
    pub daily_limits: DailyLimits,
}

impl Plan {
    /// Creates a plan record.
    pub fn new(code: PlanCode, title: impl Into<String>, daily_limits: DailyLimits) -> Self {
        Self {
            code,
            title: title.into(),
            daily_limits,
        }
    }
}

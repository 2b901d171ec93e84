//! Typed outcome of an admission check.
//!
//! Denials are ordinary values, never errors: feature handlers match on the
//! reason to show a specific message (trial exhausted vs. daily quota
//! exhausted) instead of a generic failure.

use serde::{Deserialize, Serialize};

/// Result of evaluating whether a user may use a gated feature right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Access is granted.
    Allowed(AllowReason),
    /// Access is denied with a specific reason.
    Denied(DenyReason),
}

impl AccessDecision {
    /// Returns true if access is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed(_))
    }

    /// Returns true if access is denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, AccessDecision::Denied(_))
    }

    /// Converts the decision to a Result, with denial becoming an error.
    pub fn into_result(self) -> Result<AllowReason, DenyReason> {
        match self {
            AccessDecision::Allowed(reason) => Ok(reason),
            AccessDecision::Denied(reason) => Err(reason),
        }
    }
}

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowReason {
    /// Admin flag set; no counters were consulted.
    AdminBypass,
    /// Active premium subscription; no counters were consulted.
    PremiumBypass,
    /// Trial uses remain in the current window.
    TrialAvailable,
    /// Daily quota not yet exhausted.
    QuotaAvailable,
}

/// Why access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// All trial uses for the feature are spent in the current window.
    TrialExhausted,
    /// Today's quota for the feature is exhausted.
    QuotaExhausted,
}

impl DenyReason {
    /// Get a user-facing message for the denial reason.
    pub fn user_message(&self) -> &'static str {
        match self {
            DenyReason::TrialExhausted => {
                "You've used all your free trials for this feature. \
                 Upgrade to premium or wait for your trial to reset."
            }
            DenyReason::QuotaExhausted => {
                "You've reached today's limit for this feature. \
                 Come back tomorrow or upgrade to premium."
            }
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

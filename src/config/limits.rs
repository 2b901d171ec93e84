//! Quota and trial limit configuration
//!
//! Supplies the trial window constants and the per-plan daily limit
//! defaults. A daily limit of zero or below means unlimited; that sentinel
//! is passed through untouched to the catalog.

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::catalog::{CatalogError, StaticPlanCatalog};
use crate::domain::access::{DailyLimits, Plan, PlanCode, TrialPolicy};

/// Daily limits for one plan
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlanLimitsConfig {
    pub daily_quick_chat: i32,
    pub daily_code_chat: i32,
    pub daily_convert: i32,
    pub daily_pptx: i32,
}

impl PlanLimitsConfig {
    fn daily_limits(&self) -> DailyLimits {
        DailyLimits {
            quick_chat: self.daily_quick_chat,
            code_chat: self.daily_code_chat,
            convert: self.daily_convert,
            pptx: self.daily_pptx,
        }
    }
}

/// Quota and trial limits configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Length of the rolling trial window in days
    #[serde(default = "default_trial_period_days")]
    pub trial_period_days: i64,

    /// Trial uses granted per feature per window
    #[serde(default = "default_trial_uses")]
    pub trial_uses_per_period: u32,

    /// Daily limits for the free plan
    #[serde(default = "default_free_limits")]
    pub free: PlanLimitsConfig,

    /// Daily limits for the premium plan (zero = unlimited)
    #[serde(default = "default_premium_limits")]
    pub premium: PlanLimitsConfig,
}

impl LimitsConfig {
    /// The trial policy these settings describe
    pub fn trial_policy(&self) -> TrialPolicy {
        TrialPolicy {
            period_days: self.trial_period_days,
            uses_per_period: self.trial_uses_per_period,
        }
    }

    /// Build the plan catalog from the configured limits
    ///
    /// Fails if a plan record cannot be assembled; a missing plan is a
    /// startup error, never a runtime fallback.
    pub fn catalog(&self) -> Result<StaticPlanCatalog, CatalogError> {
        StaticPlanCatalog::new(vec![
            Plan::new(PlanCode::Free, "Free", self.free.daily_limits()),
            Plan::new(PlanCode::Premium, "Premium", self.premium.daily_limits()),
        ])
    }

    /// Validate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.trial_period_days < 1 {
            return Err(ValidationError::InvalidTrialPeriod);
        }
        if self.trial_uses_per_period == 0 {
            return Err(ValidationError::InvalidTrialUses);
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            trial_period_days: default_trial_period_days(),
            trial_uses_per_period: default_trial_uses(),
            free: default_free_limits(),
            premium: default_premium_limits(),
        }
    }
}

fn default_trial_period_days() -> i64 {
    7
}

fn default_trial_uses() -> u32 {
    3
}

fn default_free_limits() -> PlanLimitsConfig {
    PlanLimitsConfig {
        daily_quick_chat: 30,
        daily_code_chat: 10,
        daily_convert: 5,
        daily_pptx: 3,
    }
}

fn default_premium_limits() -> PlanLimitsConfig {
    // premium users bypass the ledger anyway; the catalog entry exists so
    // the plan lookup is total
    PlanLimitsConfig {
        daily_quick_chat: 0,
        daily_code_chat: 0,
        daily_convert: 0,
        daily_pptx: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::QuotaFeature;
    use crate::ports::PlanCatalog;

    #[test]
    fn test_limits_defaults_match_product_constants() {
        let config = LimitsConfig::default();
        assert_eq!(config.trial_period_days, 7);
        assert_eq!(config.trial_uses_per_period, 3);
        assert_eq!(config.free.daily_quick_chat, 30);
        assert_eq!(config.free.daily_pptx, 3);
    }

    #[test]
    fn test_catalog_builds_from_defaults() {
        let catalog = LimitsConfig::default().catalog().unwrap();
        let free = catalog.plan(PlanCode::Free);
        assert_eq!(free.daily_limits.get(QuotaFeature::Convert).raw(), 5);
        let premium = catalog.plan(PlanCode::Premium);
        assert!(premium.daily_limits.get(QuotaFeature::Convert).is_unlimited());
    }

    #[test]
    fn test_trial_policy_from_config() {
        let config = LimitsConfig {
            trial_period_days: 14,
            trial_uses_per_period: 5,
            ..LimitsConfig::default()
        };
        let policy = config.trial_policy();
        assert_eq!(policy.period_days, 14);
        assert_eq!(policy.uses_per_period, 5);
    }

    #[test]
    fn test_zero_period_fails_validation() {
        let config = LimitsConfig {
            trial_period_days: 0,
            ..LimitsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTrialPeriod)
        ));
    }

    #[test]
    fn test_zero_uses_fails_validation() {
        let config = LimitsConfig {
            trial_uses_per_period: 0,
            ..LimitsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTrialUses)
        ));
    }
}

//! The user profile as seen by admission control.
//!
//! Owned and persisted by the surrounding bot layer; the ledgers only read
//! it. The one mutation exposed here is the premium grant, which touches the
//! user entity alone and never the counters.

use serde::{Deserialize, Serialize};

use super::{DailyLimit, PlanCode, QuotaFeature};
use crate::domain::foundation::{Timestamp, UserId};

/// Per-user overrides of the plan's daily limits.
///
/// `None` means "use the plan default". A set value carries its own
/// unlimited sentinel (`<= 0`), independent of the plan's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOverrides {
    pub quick_chat: Option<i32>,
    pub code_chat: Option<i32>,
    pub convert: Option<i32>,
    pub pptx: Option<i32>,
}

impl LimitOverrides {
    /// No overrides; every feature falls through to the plan.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns the override for a feature, if one is set.
    pub fn get(&self, feature: QuotaFeature) -> Option<DailyLimit> {
        let raw = match feature {
            QuotaFeature::QuickChat => self.quick_chat,
            QuotaFeature::CodeChat => self.code_chat,
            QuotaFeature::Convert => self.convert,
            QuotaFeature::Pptx => self.pptx,
        };
        raw.map(DailyLimit::from_raw)
    }
}

/// A user as admission control sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Messenger account id.
    pub id: UserId,
    /// Subscription plan.
    pub plan: PlanCode,
    /// Premium access expiry; `None` means never granted.
    pub premium_until: Option<Timestamp>,
    /// Admins bypass every gate.
    pub is_admin: bool,
    /// Personal daily-limit overrides.
    pub overrides: LimitOverrides,
}

impl UserProfile {
    /// Creates a plain free-plan profile with no special access.
    pub fn free(id: UserId) -> Self {
        Self {
            id,
            plan: PlanCode::Free,
            premium_until: None,
            is_admin: false,
            overrides: LimitOverrides::none(),
        }
    }

    /// True when premium access is active: expiry set and strictly in the
    /// future of `now`.
    pub fn is_premium(&self, now: Timestamp) -> bool {
        self.premium_until
            .is_some_and(|until| now.is_before(&until))
    }

    /// True when the user bypasses both ledgers: admin, or active premium.
    pub fn is_premium_equivalent(&self, now: Timestamp) -> bool {
        self.is_admin || self.is_premium(now)
    }

    /// Extends premium access by the given number of days.
    ///
    /// An active grant is extended from its current expiry; an expired or
    /// absent grant starts counting from `now`.
    pub fn grant_premium(&mut self, now: Timestamp, days: u32) {
        let base = match self.premium_until {
            Some(until) if now.is_before(&until) => until,
            _ => now,
        };
        self.premium_until = Some(base.add_days(days as i64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile::free(UserId::new(1001).unwrap())
    }

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    #[test]
    fn free_profile_is_not_premium() {
        assert!(!user().is_premium(t0()));
        assert!(!user().is_premium_equivalent(t0()));
    }

    #[test]
    fn future_expiry_is_premium() {
        let mut u = user();
        u.premium_until = Some(t0().add_days(3));
        assert!(u.is_premium(t0()));
        assert!(u.is_premium_equivalent(t0()));
    }

    #[test]
    fn expiry_exactly_now_is_not_premium() {
        let mut u = user();
        u.premium_until = Some(t0());
        assert!(!u.is_premium(t0()));
    }

    #[test]
    fn past_expiry_is_not_premium() {
        let mut u = user();
        u.premium_until = Some(t0().add_days(-1));
        assert!(!u.is_premium(t0()));
    }

    #[test]
    fn admin_is_premium_equivalent_without_expiry() {
        let mut u = user();
        u.is_admin = true;
        assert!(!u.is_premium(t0()));
        assert!(u.is_premium_equivalent(t0()));
    }

    #[test]
    fn grant_premium_starts_from_now_when_expired() {
        let mut u = user();
        u.premium_until = Some(t0().add_days(-10));
        u.grant_premium(t0(), 30);
        assert_eq!(u.premium_until, Some(t0().add_days(30)));
    }

    #[test]
    fn grant_premium_extends_active_grant() {
        let mut u = user();
        u.premium_until = Some(t0().add_days(5));
        u.grant_premium(t0(), 30);
        assert_eq!(u.premium_until, Some(t0().add_days(35)));
    }

    #[test]
    fn grant_premium_on_fresh_user_counts_from_now() {
        let mut u = user();
        u.grant_premium(t0(), 7);
        assert_eq!(u.premium_until, Some(t0().add_days(7)));
        assert!(u.is_premium(t0().add_days(6)));
        assert!(!u.is_premium(t0().add_days(7)));
    }

    #[test]
    fn overrides_resolve_per_feature() {
        let overrides = LimitOverrides {
            convert: Some(-1),
            ..LimitOverrides::none()
        };
        assert_eq!(overrides.get(QuotaFeature::QuickChat), None);
        let convert = overrides.get(QuotaFeature::Convert).unwrap();
        assert!(convert.is_unlimited());
    }
}

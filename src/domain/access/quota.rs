//! Daily quota record for free features.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::QuotaFeature;
use crate::domain::foundation::UserId;

/// One counter per quota-gated feature.
///
/// A fixed struct with named fields rather than a keyed map: the feature set
/// is closed, and adding a variant must fail to compile at every unhandled
/// match site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaCounters {
    pub quick_chat: u32,
    pub code_chat: u32,
    pub convert: u32,
    pub pptx: u32,
}

impl QuotaCounters {
    /// Returns the count for a feature.
    pub fn get(&self, feature: QuotaFeature) -> u32 {
        match feature {
            QuotaFeature::QuickChat => self.quick_chat,
            QuotaFeature::CodeChat => self.code_chat,
            QuotaFeature::Convert => self.convert,
            QuotaFeature::Pptx => self.pptx,
        }
    }

    /// Adds to the count for a feature, saturating at the integer bound.
    pub fn add(&mut self, feature: QuotaFeature, amount: u32) {
        let slot = match feature {
            QuotaFeature::QuickChat => &mut self.quick_chat,
            QuotaFeature::CodeChat => &mut self.code_chat,
            QuotaFeature::Convert => &mut self.convert,
            QuotaFeature::Pptx => &mut self.pptx,
        };
        *slot = slot.saturating_add(amount);
    }
}

/// Usage counters for one user on one UTC calendar date.
///
/// Sparse: created lazily on first touch for a date, never for idle dates.
/// Counters only increase within a day; no write path targets a past date,
/// so day rollover is an implicit reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyQuota {
    pub user_id: UserId,
    pub usage_date: NaiveDate,
    pub counters: QuotaCounters,
}

impl DailyQuota {
    /// Creates a fresh record with all counters at zero.
    pub fn new(user_id: UserId, usage_date: NaiveDate) -> Self {
        Self {
            user_id,
            usage_date,
            counters: QuotaCounters::default(),
        }
    }
}

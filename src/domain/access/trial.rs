//! Rolling trial record for premium features.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::TrialFeature;
use crate::domain::foundation::{Timestamp, UserId};

/// Configuration constants governing the trial window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialPolicy {
    /// Length of the rolling window in days.
    pub period_days: i64,
    /// Uses granted per feature per window.
    pub uses_per_period: u32,
}

impl TrialPolicy {
    /// The rolling window as a duration.
    pub fn period(&self) -> Duration {
        Duration::days(self.period_days)
    }
}

impl Default for TrialPolicy {
    fn default() -> Self {
        Self {
            period_days: 7,
            uses_per_period: 3,
        }
    }
}

/// One used-count per trial-gated feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialCounters {
    pub image_gen: u32,
    pub image_edit: u32,
    pub pptx: u32,
}

impl TrialCounters {
    /// Returns the used count for a feature.
    pub fn get(&self, feature: TrialFeature) -> u32 {
        match feature {
            TrialFeature::ImageGen => self.image_gen,
            TrialFeature::ImageEdit => self.image_edit,
            TrialFeature::Pptx => self.pptx,
        }
    }

    /// Sets the used count for a feature.
    pub fn set(&mut self, feature: TrialFeature, value: u32) {
        match feature {
            TrialFeature::ImageGen => self.image_gen = value,
            TrialFeature::ImageEdit => self.image_edit = value,
            TrialFeature::Pptx => self.pptx = value,
        }
    }
}

/// The single rolling trial record for one user.
///
/// Created lazily on first trial-gated access with `last_reset_at = now`.
/// `last_reset_at` only ever moves forward; resets zero every counter
/// wholesale, never one feature at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialState {
    pub user_id: UserId,
    pub last_reset_at: Timestamp,
    pub used: TrialCounters,
}

impl TrialState {
    /// Creates a fresh record: window starts now, nothing used.
    pub fn new(user_id: UserId, now: Timestamp) -> Self {
        Self {
            user_id,
            last_reset_at: now,
            used: TrialCounters::default(),
        }
    }

    /// True when the window that started at `last_reset_at` has fully
    /// elapsed by `now`.
    pub fn window_elapsed(&self, now: Timestamp, policy: &TrialPolicy) -> bool {
        now.duration_since(&self.last_reset_at) >= policy.period()
    }
}

//! Closed enumerations of gated features.
//!
//! Two feature families are gated separately: free features metered against
//! a daily quota, and premium features metered against a rolling trial
//! allowance. Slide decks appear in both families; which gate applies is
//! decided per interaction by the caller via [`GatedFeature`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A free feature metered against the daily quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaFeature {
    /// General-purpose quick chat.
    QuickChat,
    /// Code-focused chat.
    CodeChat,
    /// File conversion.
    Convert,
    /// Slide-deck authoring.
    Pptx,
}

impl QuotaFeature {
    /// Every quota-gated feature, in display order.
    pub const ALL: [QuotaFeature; 4] = [
        QuotaFeature::QuickChat,
        QuotaFeature::CodeChat,
        QuotaFeature::Convert,
        QuotaFeature::Pptx,
    ];

    /// Returns the snake_case name of the feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaFeature::QuickChat => "quick_chat",
            QuotaFeature::CodeChat => "code_chat",
            QuotaFeature::Convert => "convert",
            QuotaFeature::Pptx => "pptx",
        }
    }
}

impl fmt::Display for QuotaFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A premium feature metered against the rolling trial allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialFeature {
    /// Image generation.
    ImageGen,
    /// Image editing.
    ImageEdit,
    /// Slide-deck authoring (premium variant).
    Pptx,
}

impl TrialFeature {
    /// Every trial-gated feature, in display order.
    pub const ALL: [TrialFeature; 3] = [
        TrialFeature::ImageGen,
        TrialFeature::ImageEdit,
        TrialFeature::Pptx,
    ];

    /// Returns the snake_case name of the feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialFeature::ImageGen => "image_gen",
            TrialFeature::ImageEdit => "image_edit",
            TrialFeature::Pptx => "pptx",
        }
    }
}

impl fmt::Display for TrialFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A feature paired with the gate class it is being requested under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "class", content = "feature", rename_all = "snake_case")]
pub enum GatedFeature {
    /// Always-free, daily-quota-gated.
    Daily(QuotaFeature),
    /// Premium-with-trial, trial-gated.
    Trial(TrialFeature),
}

impl fmt::Display for GatedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatedFeature::Daily(feature) => write!(f, "{} (daily)", feature),
            GatedFeature::Trial(feature) => write!(f, "{} (trial)", feature),
        }
    }
}

/// Tier classification for composite influence scores.
///
/// The ladder is evaluated top-down; a composite equal to a threshold
/// belongs to the tier that threshold opens (90 is Extreme, 89 is not).
use super::score_types::Score0To100;
use crate::errors::{ConfigIssue, Error, Result};
use serde::{Deserialize, Serialize};

/// Qualitative influence tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfluenceTier {
    /// Composite at or above the highest threshold
    Extreme,
    High,
    Moderate,
    /// Everything below the moderate threshold
    Low,
}

impl InfluenceTier {
    pub const ALL: [InfluenceTier; 4] = [
        InfluenceTier::Extreme,
        InfluenceTier::High,
        InfluenceTier::Moderate,
        InfluenceTier::Low,
    ];

    /// Get tier label for display
    pub fn label(&self) -> &'static str {
        match self {
            InfluenceTier::Extreme => "Extreme influence",
            InfluenceTier::High => "High influence",
            InfluenceTier::Moderate => "Moderate influence",
            InfluenceTier::Low => "Low influence",
        }
    }

    /// Get short tier label
    pub fn short_label(&self) -> &'static str {
        match self {
            InfluenceTier::Extreme => "extreme",
            InfluenceTier::High => "high",
            InfluenceTier::Moderate => "moderate",
            InfluenceTier::Low => "low",
        }
    }
}

/// Strictly descending composite thresholds for the upper three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierLadder {
    extreme: u8,
    high: u8,
    moderate: u8,
}

impl Default for TierLadder {
    fn default() -> Self {
        Self {
            extreme: 90,
            high: 70,
            moderate: 50,
        }
    }
}

impl TierLadder {
    pub fn new(extreme: u8, high: u8, moderate: u8) -> Result<Self> {
        let issues = Self::check(extreme, high, moderate);
        if !issues.is_empty() {
            return Err(Error::Configuration(issues));
        }
        Ok(Self {
            extreme,
            high,
            moderate,
        })
    }

    /// Pure invariant check; returns every issue found.
    pub fn check(extreme: u8, high: u8, moderate: u8) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if extreme > 100 {
            issues.push(ConfigIssue::new(
                "tiers.extreme",
                format!("threshold must be at most 100, got {}", extreme),
            ));
        }
        if !(extreme > high && high > moderate) {
            issues.push(ConfigIssue::new(
                "tiers",
                format!(
                    "thresholds must be strictly descending (extreme > high > moderate), got {} / {} / {}",
                    extreme, high, moderate
                ),
            ));
        }
        issues
    }

    pub fn classify(&self, composite: Score0To100) -> InfluenceTier {
        let value = composite.value();
        if value >= self.extreme {
            InfluenceTier::Extreme
        } else if value >= self.high {
            InfluenceTier::High
        } else if value >= self.moderate {
            InfluenceTier::Moderate
        } else {
            InfluenceTier::Low
        }
    }

    /// Lowest composite that reaches `tier` (0 for the bottom tier).
    pub fn threshold(&self, tier: InfluenceTier) -> u8 {
        match tier {
            InfluenceTier::Extreme => self.extreme,
            InfluenceTier::High => self.high,
            InfluenceTier::Moderate => self.moderate,
            InfluenceTier::Low => 0,
        }
    }
}

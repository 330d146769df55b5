//! Tier and surge threshold configuration.

use crate::errors::Result;
use crate::scoring::TierLadder;
use crate::surge::SurgeThresholds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `[tiers]`: composite score at which each tier starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholdConfig {
    #[serde(default = "default_extreme_threshold")]
    pub extreme: u8,
    #[serde(default = "default_high_threshold")]
    pub high: u8,
    #[serde(default = "default_moderate_threshold")]
    pub moderate: u8,
}

impl Default for TierThresholdConfig {
    fn default() -> Self {
        Self {
            extreme: default_extreme_threshold(),
            high: default_high_threshold(),
            moderate: default_moderate_threshold(),
        }
    }
}

impl TierThresholdConfig {
    pub fn build(&self) -> Result<TierLadder> {
        TierLadder::new(self.extreme, self.high, self.moderate)
    }
}

pub fn default_extreme_threshold() -> u8 {
    90
}
pub fn default_high_threshold() -> u8 {
    70
}
pub fn default_moderate_threshold() -> u8 {
    50
}

/// `[surge.<context>]`: percent-change cutoffs for one view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurgeThresholdConfig {
    pub surging: f64,
    pub growing: f64,
    pub stable_floor: f64,
}

impl SurgeThresholdConfig {
    pub fn build(&self, context: &str) -> Result<SurgeThresholds> {
        let issues = SurgeThresholds::check(
            &format!("surge.{}", context),
            self.surging,
            self.growing,
            self.stable_floor,
        );
        if !issues.is_empty() {
            return Err(crate::errors::Error::Configuration(issues));
        }
        SurgeThresholds::new(self.surging, self.growing, self.stable_floor)
    }
}

impl From<SurgeThresholds> for SurgeThresholdConfig {
    fn from(thresholds: SurgeThresholds) -> Self {
        Self {
            surging: thresholds.surging(),
            growing: thresholds.growing(),
            stable_floor: thresholds.stable_floor(),
        }
    }
}

pub fn default_surge_contexts() -> BTreeMap<String, SurgeThresholdConfig> {
    BTreeMap::from([
        (
            "client_trajectory".to_string(),
            SurgeThresholds::client_trajectory().into(),
        ),
        (
            "issue_momentum".to_string(),
            SurgeThresholds::issue_momentum().into(),
        ),
    ])
}

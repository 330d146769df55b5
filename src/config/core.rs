use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::scoring::{default_schemes, SchemeConfig};
use super::similarity::SimilarityConfig;
use super::thresholds::{default_surge_contexts, SurgeThresholdConfig, TierThresholdConfig};

/// Root configuration structure for lobbymap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbymapConfig {
    /// Stamped on every report produced with this configuration
    #[serde(default = "default_methodology_version")]
    pub methodology_version: String,

    /// Tier thresholds on the composite score
    #[serde(default)]
    pub tiers: TierThresholdConfig,

    /// Similar-entity ranking settings
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Surge cutoffs per presentation context
    #[serde(default = "default_surge_contexts")]
    pub surge: BTreeMap<String, SurgeThresholdConfig>,

    /// Scoring schemes, one per name
    #[serde(default = "default_schemes")]
    pub schemes: Vec<SchemeConfig>,
}

impl Default for LobbymapConfig {
    fn default() -> Self {
        Self {
            methodology_version: default_methodology_version(),
            tiers: TierThresholdConfig::default(),
            similarity: SimilarityConfig::default(),
            surge: default_surge_contexts(),
            schemes: default_schemes(),
        }
    }
}

pub fn default_methodology_version() -> String {
    "2024.1".to_string()
}

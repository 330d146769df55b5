use crate::core::Metric;
use crate::errors::ConfigIssue;
use crate::similarity::OverlapMode;
use serde::{Deserialize, Serialize};

/// `[similarity]` settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Added when target and candidate share a geography
    #[serde(default = "default_geography_bonus")]
    pub geography_bonus: f64,

    /// Length of each similar-entities list
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// `count` (one point per shared issue) or `jaccard`
    #[serde(default)]
    pub overlap: OverlapMode,

    /// Secondary sort key for equally similar candidates
    #[serde(default = "default_rank_metric")]
    pub rank_metric: Metric,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            geography_bonus: default_geography_bonus(),
            top_k: default_top_k(),
            overlap: OverlapMode::default(),
            rank_metric: default_rank_metric(),
        }
    }
}

impl SimilarityConfig {
    pub fn check(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !(self.geography_bonus.is_finite() && self.geography_bonus >= 0.0) {
            issues.push(ConfigIssue::new(
                "similarity.geography_bonus",
                format!("must be a non-negative number, got {}", self.geography_bonus),
            ));
        }
        if self.top_k == 0 {
            issues.push(ConfigIssue::new("similarity.top_k", "must be greater than 0"));
        }
        issues
    }
}

pub fn default_geography_bonus() -> f64 {
    2.0
}

pub fn default_top_k() -> usize {
    5
}

pub fn default_rank_metric() -> Metric {
    Metric::TotalSpend
}

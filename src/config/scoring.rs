//! Scoring scheme configuration.

use crate::core::{EntityKind, Metric};
use crate::errors::Result;
use crate::scoring::{MetricDimension, ScoringScheme};
use serde::{Deserialize, Serialize};

/// One `{ metric, weight }` entry of a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionConfig {
    pub metric: Metric,
    /// Weight for this dimension (0.0-1.0); all weights in a scheme sum to 1.0
    pub weight: f64,
}

/// A `[[schemes]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeConfig {
    pub name: String,
    pub entity_kind: EntityKind,

    /// Metric that selects the cohort and breaks composite ties
    #[serde(default = "default_seed_metric")]
    pub seed_metric: Metric,

    /// Top-N cohort size; omit to score the whole population
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort_size: Option<usize>,

    pub dimensions: Vec<DimensionConfig>,
}

impl SchemeConfig {
    pub fn build(&self) -> Result<ScoringScheme> {
        ScoringScheme::new(
            self.name.clone(),
            self.entity_kind,
            self.seed_metric,
            self.cohort_size,
            self.dimensions
                .iter()
                .map(|d| MetricDimension::new(d.metric, d.weight))
                .collect(),
        )
    }
}

impl From<&ScoringScheme> for SchemeConfig {
    fn from(scheme: &ScoringScheme) -> Self {
        Self {
            name: scheme.name().to_string(),
            entity_kind: scheme.entity_kind(),
            seed_metric: scheme.seed_metric(),
            cohort_size: scheme.cohort_size(),
            dimensions: scheme
                .dimensions()
                .iter()
                .map(|d| DimensionConfig {
                    metric: d.metric,
                    weight: d.weight,
                })
                .collect(),
        }
    }
}

pub fn default_seed_metric() -> Metric {
    Metric::TotalSpend
}

pub fn default_schemes() -> Vec<SchemeConfig> {
    ScoringScheme::presets()
        .iter()
        .map(SchemeConfig::from)
        .collect()
}

//! Scoring schemes: a weighted set of metric dimensions plus the cohort rule.
//!
//! A scheme is configuration, not data. Its invariants are checked once when
//! it is built, never per scoring call:
//!
//! - at least one dimension, no metric listed twice
//! - every weight within [0.0, 1.0]
//! - weights sum to 1.0 (within [`WEIGHT_SUM_TOLERANCE`])
//! - a cohort size, when given, is non-zero

use crate::core::{EntityKind, Metric};
use crate::errors::{ConfigIssue, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// One scored dimension: which metric to read and how much it counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDimension {
    pub metric: Metric,
    pub weight: f64,
}

impl MetricDimension {
    pub const fn new(metric: Metric, weight: f64) -> Self {
        Self { metric, weight }
    }
}

/// A validated scoring scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringScheme {
    name: String,
    entity_kind: EntityKind,
    seed_metric: Metric,
    cohort_size: Option<usize>,
    dimensions: Vec<MetricDimension>,
}

impl ScoringScheme {
    /// Build a scheme, rejecting it with every violated invariant listed.
    pub fn new(
        name: impl Into<String>,
        entity_kind: EntityKind,
        seed_metric: Metric,
        cohort_size: Option<usize>,
        dimensions: Vec<MetricDimension>,
    ) -> Result<Self> {
        let name = name.into();
        let issues = Self::check(&name, cohort_size, &dimensions);
        if !issues.is_empty() {
            return Err(Error::Configuration(issues));
        }
        Ok(Self {
            name,
            entity_kind,
            seed_metric,
            cohort_size,
            dimensions,
        })
    }

    /// Pure invariant check; returns every issue found.
    pub fn check(
        name: &str,
        cohort_size: Option<usize>,
        dimensions: &[MetricDimension],
    ) -> Vec<ConfigIssue> {
        let field = format!("schemes.{}", name);
        let mut issues = Vec::new();

        if name.trim().is_empty() {
            issues.push(ConfigIssue::new("schemes", "scheme name must not be empty"));
        }
        if dimensions.is_empty() {
            issues.push(ConfigIssue::new(&field, "at least one dimension is required"));
        }
        if cohort_size == Some(0) {
            issues.push(ConfigIssue::new(&field, "cohort_size must be greater than 0"));
        }

        let mut seen = BTreeSet::new();
        for dimension in dimensions {
            if !seen.insert(dimension.metric) {
                issues.push(ConfigIssue::new(
                    &field,
                    format!("metric {} is listed more than once", dimension.metric),
                ));
            }
            if !(0.0..=1.0).contains(&dimension.weight) {
                issues.push(ConfigIssue::new(
                    format!("{}.{}", field, dimension.metric),
                    format!("weight must be between 0.0 and 1.0, got {}", dimension.weight),
                ));
            }
        }

        let sum: f64 = dimensions.iter().map(|d| d.weight).sum();
        if !dimensions.is_empty() && !((sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE) {
            issues.push(ConfigIssue::new(
                &field,
                format!("dimension weights must sum to 1.0, but sum to {:.3}", sum),
            ));
        }

        issues
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    /// Metric used to select the cohort and to break composite ties.
    pub fn seed_metric(&self) -> Metric {
        self.seed_metric
    }

    pub fn cohort_size(&self) -> Option<usize> {
        self.cohort_size
    }

    pub fn dimensions(&self) -> &[MetricDimension] {
        &self.dimensions
    }

    /// Same scheme scored over a different cohort size.
    pub fn with_cohort_size(self, cohort_size: Option<usize>) -> Result<Self> {
        Self::new(
            self.name,
            self.entity_kind,
            self.seed_metric,
            cohort_size,
            self.dimensions,
        )
    }

    // Presets are constant tables; `presets_satisfy_invariants` guards them.
    fn preset(
        name: &str,
        entity_kind: EntityKind,
        dimensions: &[(Metric, f64)],
    ) -> Self {
        Self {
            name: name.to_string(),
            entity_kind,
            seed_metric: Metric::TotalSpend,
            cohort_size: Some(200),
            dimensions: dimensions
                .iter()
                .map(|&(metric, weight)| MetricDimension::new(metric, weight))
                .collect(),
        }
    }

    /// Client influence: top 200 clients by spend.
    pub fn client_influence() -> Self {
        Self::preset(
            "client_influence",
            EntityKind::Client,
            &[
                (Metric::TotalSpend, 0.30),
                (Metric::RevolvingDoorCount, 0.25),
                (Metric::IssueCount, 0.15),
                (Metric::FilingCount, 0.15),
                (Metric::YearsActive, 0.15),
            ],
        )
    }

    /// Firm influence: top 200 firms by lobbying income.
    pub fn firm_influence() -> Self {
        Self::preset(
            "firm_influence",
            EntityKind::Firm,
            &[
                (Metric::TotalSpend, 0.35),
                (Metric::ClientCount, 0.25),
                (Metric::LobbyistCount, 0.20),
                (Metric::IssueCount, 0.10),
                (Metric::RevolvingDoorCount, 0.10),
            ],
        )
    }

    /// Lobbyist influence: top 200 lobbyists by attributed spend.
    pub fn lobbyist_influence() -> Self {
        Self::preset(
            "lobbyist_influence",
            EntityKind::Lobbyist,
            &[
                (Metric::TotalSpend, 0.30),
                (Metric::ClientCount, 0.25),
                (Metric::FilingCount, 0.20),
                (Metric::IssueCount, 0.15),
                (Metric::YearsActive, 0.10),
            ],
        )
    }

    pub fn presets() -> Vec<Self> {
        vec![
            Self::client_influence(),
            Self::firm_influence(),
            Self::lobbyist_influence(),
        ]
    }
}

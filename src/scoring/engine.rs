use super::normalize::{cohort_max, normalize};
use super::scheme::ScoringScheme;
use super::score_types::Score0To100;
use super::tiers::{InfluenceTier, TierLadder};
use crate::core::{Metric, ScorableEntity};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info_span, trace};

/// One dimension of an entity's score, kept for explanation output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionScore {
    /// Raw metric value read from the entity (0 when absent)
    pub raw: f64,
    /// Cohort maximum the raw value was normalized against
    pub cohort_max: f64,
    pub normalized: Score0To100,
    pub weight: f64,
    /// `normalized * weight`, before rounding
    pub contribution: f64,
}

/// A scored entity. Derived fresh on every run, never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntity<'a> {
    /// 1-based position in the final ordering
    pub rank: usize,
    pub entity: &'a ScorableEntity,
    pub dimensions: BTreeMap<Metric, DimensionScore>,
    pub composite: Score0To100,
    pub tier: InfluenceTier,
}

impl ScoredEntity<'_> {
    /// Normalized score for `metric` (0 when the scheme does not use it).
    pub fn normalized(&self, metric: Metric) -> Score0To100 {
        self.dimensions
            .get(&metric)
            .map(|d| d.normalized)
            .unwrap_or(Score0To100::ZERO)
    }
}

/// Scores entity cohorts against one scheme and tier ladder.
///
/// Stateless apart from its configuration; one engine can serve any number
/// of concurrent scoring calls.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    scheme: ScoringScheme,
    ladder: TierLadder,
}

impl ScoringEngine {
    pub fn new(scheme: ScoringScheme, ladder: TierLadder) -> Self {
        Self { scheme, ladder }
    }

    pub fn scheme(&self) -> &ScoringScheme {
        &self.scheme
    }

    pub fn ladder(&self) -> &TierLadder {
        &self.ladder
    }

    /// The normalization reference group: the top `cohort_size` entities by
    /// seed metric (ties by id), or everyone when no size is set.
    pub fn select_cohort<'a>(&self, entities: &'a [ScorableEntity]) -> Vec<&'a ScorableEntity> {
        let seed = self.scheme.seed_metric();
        let mut cohort: Vec<&ScorableEntity> = entities.iter().collect();
        cohort.sort_by(|a, b| {
            b.metric(seed)
                .total_cmp(&a.metric(seed))
                .then_with(|| a.id.cmp(&b.id))
        });
        if let Some(size) = self.scheme.cohort_size() {
            cohort.truncate(size);
        }
        cohort
    }

    /// Score and rank the cohort drawn from `entities`.
    ///
    /// Output is ordered by composite descending, then seed metric
    /// descending, then id ascending, so identical input always yields
    /// identical output.
    pub fn score<'a>(&self, entities: &'a [ScorableEntity]) -> Vec<ScoredEntity<'a>> {
        let _span = info_span!(
            "score",
            scheme = self.scheme.name(),
            population = entities.len()
        )
        .entered();

        let cohort = self.select_cohort(entities);
        let maxima = self.dimension_maxima(&cohort);

        let mut scored: Vec<ScoredEntity<'a>> = cohort
            .into_iter()
            .map(|entity| self.score_entity(entity, &maxima))
            .collect();

        let seed = self.scheme.seed_metric();
        scored.sort_by(|a, b| compare_ranked(a, b, seed));
        for (index, entry) in scored.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        debug!(cohort = scored.len(), "scored cohort");
        scored
    }

    fn dimension_maxima(&self, cohort: &[&ScorableEntity]) -> BTreeMap<Metric, f64> {
        self.scheme
            .dimensions()
            .iter()
            .map(|dimension| {
                let max = cohort_max(cohort, dimension.metric);
                if max == 0.0 && !cohort.is_empty() {
                    debug!(
                        metric = %dimension.metric,
                        "every cohort member has zero for this dimension; normalized scores are 0"
                    );
                }
                (dimension.metric, max)
            })
            .collect()
    }

    fn score_entity<'a>(
        &self,
        entity: &'a ScorableEntity,
        maxima: &BTreeMap<Metric, f64>,
    ) -> ScoredEntity<'a> {
        let dimensions: BTreeMap<Metric, DimensionScore> = self
            .scheme
            .dimensions()
            .iter()
            .map(|dimension| {
                if !entity.has_metric(dimension.metric) {
                    trace!(entity = %entity.id, metric = %dimension.metric, "metric missing, using 0");
                }
                let raw = entity.metric(dimension.metric);
                let max = maxima.get(&dimension.metric).copied().unwrap_or(0.0);
                let normalized = normalize(raw, max);
                let score = DimensionScore {
                    raw,
                    cohort_max: max,
                    normalized,
                    weight: dimension.weight,
                    contribution: normalized.as_f64() * dimension.weight,
                };
                (dimension.metric, score)
            })
            .collect();

        let weighted_sum: f64 = dimensions.values().map(|d| d.contribution).sum();
        let composite = Score0To100::from_rounded(weighted_sum);

        ScoredEntity {
            rank: 0,
            entity,
            dimensions,
            composite,
            tier: self.ladder.classify(composite),
        }
    }
}

fn compare_ranked(a: &ScoredEntity<'_>, b: &ScoredEntity<'_>, seed: Metric) -> Ordering {
    b.composite
        .cmp(&a.composite)
        .then_with(|| b.entity.metric(seed).total_cmp(&a.entity.metric(seed)))
        .then_with(|| a.entity.id.cmp(&b.entity.id))
}

/// Score `entities` with `scheme` and the default tier ladder.
pub fn score<'a>(entities: &'a [ScorableEntity], scheme: &ScoringScheme) -> Vec<ScoredEntity<'a>> {
    ScoringEngine::new(scheme.clone(), TierLadder::default()).score(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityKind;
    use crate::scoring::MetricDimension;

    fn client(id: &str, spend: f64, issues: f64) -> ScorableEntity {
        ScorableEntity::new(id, id.to_uppercase(), EntityKind::Client)
            .with_metric(Metric::TotalSpend, spend)
            .with_metric(Metric::IssueCount, issues)
    }

    fn spend_issue_scheme(cohort_size: Option<usize>) -> ScoringScheme {
        ScoringScheme::new(
            "test",
            EntityKind::Client,
            Metric::TotalSpend,
            cohort_size,
            vec![
                MetricDimension::new(Metric::TotalSpend, 0.6),
                MetricDimension::new(Metric::IssueCount, 0.4),
            ],
        )
        .unwrap()
    }

    #[test]
    fn worked_example_three_entities() {
        let entities = vec![
            client("b", 50.0, 1.0),
            client("c", 0.0, 0.0),
            client("a", 100.0, 5.0),
        ];
        let scored = score(&entities, &spend_issue_scheme(None));
        let ids: Vec<&str> = scored.iter().map(|s| s.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let a = &scored[0];
        assert_eq!(a.normalized(Metric::TotalSpend).value(), 100);
        assert_eq!(a.normalized(Metric::IssueCount).value(), 100);
        assert_eq!(a.composite.value(), 100);
        assert_eq!(a.tier, InfluenceTier::Extreme);

        let b = &scored[1];
        assert_eq!(b.normalized(Metric::TotalSpend).value(), 78);
        assert_eq!(b.normalized(Metric::IssueCount).value(), 57);
        // round(78 * 0.6 + 57 * 0.4) = round(69.6)
        assert_eq!(b.composite.value(), 70);
        assert_eq!(b.tier, InfluenceTier::High);

        let c = &scored[2];
        assert_eq!(c.normalized(Metric::TotalSpend), Score0To100::ZERO);
        assert_eq!(c.normalized(Metric::IssueCount), Score0To100::ZERO);
        assert_eq!(c.composite, Score0To100::ZERO);
        assert_eq!(c.tier, InfluenceTier::Low);

        let ranks: Vec<usize> = scored.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn cohort_is_normalization_reference() {
        let entities = vec![
            client("a", 1000.0, 1.0),
            client("b", 100.0, 1.0),
            client("c", 10.0, 1.0),
        ];
        let scheme = spend_issue_scheme(Some(2));
        let scored = score(&entities, &scheme);

        assert_eq!(scored.len(), 2);
        assert!(scored.iter().all(|s| s.entity.id.as_str() != "c"));
        assert_eq!(scored[0].dimensions[&Metric::TotalSpend].cohort_max, 1000.0);
    }

    #[test]
    fn all_zero_dimension_scores_zero_without_error() {
        let entities = vec![client("a", 10.0, 0.0), client("b", 5.0, 0.0)];
        let scored = score(&entities, &spend_issue_scheme(None));
        assert!(scored
            .iter()
            .all(|s| s.normalized(Metric::IssueCount) == Score0To100::ZERO));
    }

    #[test]
    fn ties_break_on_seed_metric_then_id() {
        // Same composite (both top every dimension they have), different spend.
        let scheme = ScoringScheme::new(
            "issues_only",
            EntityKind::Client,
            Metric::TotalSpend,
            None,
            vec![MetricDimension::new(Metric::IssueCount, 1.0)],
        )
        .unwrap();
        let entities = vec![
            client("z", 10.0, 3.0),
            client("y", 20.0, 3.0),
            client("x", 10.0, 3.0),
        ];
        let scored = ScoringEngine::new(scheme, TierLadder::default()).score(&entities);
        let ids: Vec<&str> = scored.iter().map(|s| s.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z"]);
    }

    #[test]
    fn missing_metrics_are_treated_as_zero() {
        let entities = vec![
            client("a", 100.0, 4.0),
            ScorableEntity::new("b", "B", EntityKind::Client).with_metric(Metric::TotalSpend, 100.0),
        ];
        let scored = score(&entities, &spend_issue_scheme(None));
        let b = scored.iter().find(|s| s.entity.id.as_str() == "b").unwrap();
        assert_eq!(b.normalized(Metric::IssueCount), Score0To100::ZERO);
        assert_eq!(b.composite.value(), 60);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(score(&[], &spend_issue_scheme(Some(10))).is_empty());
    }

    #[test]
    fn contributions_sum_to_unrounded_composite() {
        let entities = vec![client("a", 100.0, 5.0), client("b", 50.0, 1.0)];
        let scored = score(&entities, &spend_issue_scheme(None));
        let b = &scored[1];
        let sum: f64 = b.dimensions.values().map(|d| d.contribution).sum();
        assert!((sum - 69.6).abs() < 1e-9);
    }
}

use super::engine::{ScoredEntity, ScoringEngine};
use super::tiers::InfluenceTier;
use crate::core::{EntityKind, ScorableEntity};
use serde::Serialize;
use std::collections::BTreeMap;

/// Disclosure that must accompany any displayed influence score.
pub const COHORT_NOTE: &str = "Influence scores are normalized against the cohort shown \
(the top entities by the scheme's seed metric). They rank entities within this cohort and \
are not comparable to scores computed over a different cohort.";

/// A scoring run stamped with the methodology that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport<'a> {
    pub scheme: String,
    pub methodology_version: String,
    pub entity_kind: EntityKind,
    /// Records offered to the engine
    pub population: usize,
    /// Records actually scored (the normalization cohort)
    pub cohort_size: usize,
    pub note: &'static str,
    pub entries: Vec<ScoredEntity<'a>>,
}

impl<'a> ScoreReport<'a> {
    pub fn build(
        engine: &ScoringEngine,
        methodology_version: impl Into<String>,
        entities: &'a [ScorableEntity],
    ) -> Self {
        let entries = engine.score(entities);
        Self {
            scheme: engine.scheme().name().to_string(),
            methodology_version: methodology_version.into(),
            entity_kind: engine.scheme().entity_kind(),
            population: entities.len(),
            cohort_size: entries.len(),
            note: COHORT_NOTE,
            entries,
        }
    }

    /// Number of entries per tier, including empty tiers.
    pub fn tier_counts(&self) -> BTreeMap<InfluenceTier, usize> {
        let mut counts: BTreeMap<InfluenceTier, usize> =
            InfluenceTier::ALL.iter().map(|tier| (*tier, 0)).collect();
        for entry in &self.entries {
            *counts.entry(entry.tier).or_default() += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Metric;
    use crate::scoring::{ScoringScheme, TierLadder};

    #[test]
    fn report_records_population_and_cohort() {
        let entities: Vec<ScorableEntity> = (0..5)
            .map(|i| {
                ScorableEntity::new(format!("c{}", i), format!("Client {}", i), EntityKind::Client)
                    .with_metric(Metric::TotalSpend, f64::from(i) * 10.0)
            })
            .collect();
        let scheme = ScoringScheme::client_influence()
            .with_cohort_size(Some(3))
            .unwrap();
        let engine = ScoringEngine::new(scheme, TierLadder::default());

        let report = ScoreReport::build(&engine, "2024.1", &entities);

        assert_eq!(report.population, 5);
        assert_eq!(report.cohort_size, 3);
        assert_eq!(report.scheme, "client_influence");
        assert_eq!(report.tier_counts().values().sum::<usize>(), 3);
        assert_eq!(report.tier_counts().len(), 4);
    }
}

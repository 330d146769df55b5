use super::engine::{RelatedEntities, SimilarityEngine};
use super::signals::OverlapMode;
use crate::core::{EntityKind, ScorableEntity};
use serde::Serialize;

/// Related-entity lists for presentation, stamped with the settings used.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityReport<'a> {
    pub methodology_version: String,
    pub entity_kind: EntityKind,
    pub overlap: OverlapMode,
    pub top_k: usize,
    pub results: Vec<RelatedEntities<'a>>,
}

impl<'a> SimilarityReport<'a> {
    /// Lists for the given targets, each ranked against the whole pool.
    pub fn for_targets(
        engine: &SimilarityEngine,
        methodology_version: impl Into<String>,
        entity_kind: EntityKind,
        targets: &[&'a ScorableEntity],
        pool: &'a [ScorableEntity],
        k: usize,
    ) -> Self {
        let results = targets
            .iter()
            .copied()
            .map(|target| RelatedEntities {
                target,
                similar: engine.similar(target, pool, k),
            })
            .collect();
        Self::new(engine, methodology_version, entity_kind, k, results)
    }

    /// Lists for every entity in the pool.
    pub fn for_pool(
        engine: &SimilarityEngine,
        methodology_version: impl Into<String>,
        entity_kind: EntityKind,
        pool: &'a [ScorableEntity],
        k: usize,
    ) -> Self {
        let results = engine.related_all(pool, k);
        Self::new(engine, methodology_version, entity_kind, k, results)
    }

    fn new(
        engine: &SimilarityEngine,
        methodology_version: impl Into<String>,
        entity_kind: EntityKind,
        top_k: usize,
        results: Vec<RelatedEntities<'a>>,
    ) -> Self {
        Self {
            methodology_version: methodology_version.into(),
            entity_kind,
            overlap: engine.overlap(),
            top_k,
            results,
        }
    }
}

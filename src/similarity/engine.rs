use super::signals::{geography_signal, issue_overlap_signal, MatchFactor, OverlapMode};
use crate::config::SimilarityConfig;
use crate::core::{Metric, ScorableEntity};
use crate::errors::{Error, Result};
use crate::observability::set_current_entity;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info_span};

/// A candidate ranked against one target. Discarded after ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityCandidate<'a> {
    pub entity: &'a ScorableEntity,
    /// Sum of factor weights; non-negative, no fixed upper bound
    pub score: f64,
    pub factors: Vec<MatchFactor>,
}

/// The "related" list for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedEntities<'a> {
    pub target: &'a ScorableEntity,
    pub similar: Vec<SimilarityCandidate<'a>>,
}

#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    geography_bonus: f64,
    overlap: OverlapMode,
    rank_metric: Metric,
    top_k: usize,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        let config = SimilarityConfig::default();
        Self {
            geography_bonus: config.geography_bonus,
            overlap: config.overlap,
            rank_metric: config.rank_metric,
            top_k: config.top_k,
        }
    }
}

impl SimilarityEngine {
    pub fn new(config: &SimilarityConfig) -> Result<Self> {
        let issues = config.check();
        if !issues.is_empty() {
            return Err(Error::Configuration(issues));
        }
        Ok(Self {
            geography_bonus: config.geography_bonus,
            overlap: config.overlap,
            rank_metric: config.rank_metric,
            top_k: config.top_k,
        })
    }

    /// Configured list length.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn overlap(&self) -> OverlapMode {
        self.overlap
    }

    /// Score one candidate against the target.
    pub fn score_pair(
        &self,
        target: &ScorableEntity,
        candidate: &ScorableEntity,
    ) -> (f64, Vec<MatchFactor>) {
        let factors: Vec<MatchFactor> = [
            geography_signal(target, candidate, self.geography_bonus),
            issue_overlap_signal(target, candidate, self.overlap),
        ]
        .into_iter()
        .flatten()
        .collect();
        let score = factors.iter().map(MatchFactor::weight).sum();
        (score, factors)
    }

    /// The `k` candidates most similar to `target`.
    ///
    /// The target itself (matched by id) and zero-score candidates are
    /// excluded; fewer than `k` results are returned rather than padding.
    /// Ordering: score descending, rank metric descending, id ascending.
    pub fn similar<'a>(
        &self,
        target: &ScorableEntity,
        candidates: &'a [ScorableEntity],
        k: usize,
    ) -> Vec<SimilarityCandidate<'a>> {
        let mut ranked: Vec<SimilarityCandidate<'a>> = candidates
            .iter()
            .filter(|candidate| candidate.id != target.id)
            .filter_map(|candidate| {
                let (score, factors) = self.score_pair(target, candidate);
                (score > 0.0).then_some(SimilarityCandidate {
                    entity: candidate,
                    score,
                    factors,
                })
            })
            .collect();

        if ranked.is_empty() {
            debug!(target = %target.id, "no candidate shares geography or issues with target");
        }

        ranked.sort_by(|a, b| self.compare(a, b));
        ranked.truncate(k);
        ranked
    }

    /// Related lists for every entity in `pool`, computed in parallel.
    ///
    /// Each list is an independent computation over the same immutable pool.
    pub fn related_all<'a>(&self, pool: &'a [ScorableEntity], k: usize) -> Vec<RelatedEntities<'a>> {
        let _span = info_span!("related_all", pool = pool.len(), k).entered();
        pool.par_iter()
            .map(|target| {
                let _entity = set_current_entity(target.id.as_str());
                RelatedEntities {
                    target,
                    similar: self.similar(target, pool, k),
                }
            })
            .collect()
    }

    fn compare(&self, a: &SimilarityCandidate<'_>, b: &SimilarityCandidate<'_>) -> Ordering {
        b.score
            .total_cmp(&a.score)
            .then_with(|| {
                b.entity
                    .metric(self.rank_metric)
                    .total_cmp(&a.entity.metric(self.rank_metric))
            })
            .then_with(|| a.entity.id.cmp(&b.entity.id))
    }
}

/// Top-`k` similar candidates with the default engine (+2 geography, raw overlap count).
pub fn similar<'a>(
    target: &ScorableEntity,
    candidates: &'a [ScorableEntity],
    k: usize,
) -> Vec<SimilarityCandidate<'a>> {
    SimilarityEngine::default().similar(target, candidates, k)
}

use crate::core::EntityKind;
use crate::errors::{Error, Result};
use crate::scoring::{ScoringEngine, ScoringScheme, TierLadder};
use crate::similarity::SimilarityEngine;
use crate::surge::SurgeThresholds;
use std::collections::BTreeMap;

/// Validated engine inputs built from a [`LobbymapConfig`](super::LobbymapConfig).
///
/// Only obtainable through [`validate_config`](super::validate_config), so
/// holding one means every scheme and ladder satisfies its invariants.
#[derive(Debug, Clone)]
pub struct Methodology {
    pub(super) version: String,
    pub(super) schemes: Vec<ScoringScheme>,
    pub(super) ladder: TierLadder,
    pub(super) surge: BTreeMap<String, SurgeThresholds>,
    pub(super) similarity: SimilarityEngine,
}

impl Methodology {
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn schemes(&self) -> &[ScoringScheme] {
        &self.schemes
    }

    pub fn scheme(&self, name: &str) -> Result<&ScoringScheme> {
        self.schemes
            .iter()
            .find(|scheme| scheme.name() == name)
            .ok_or_else(|| Error::UnknownScheme(name.to_string()))
    }

    /// First configured scheme for `kind`.
    pub fn scheme_for(&self, kind: EntityKind) -> Result<&ScoringScheme> {
        self.schemes
            .iter()
            .find(|scheme| scheme.entity_kind() == kind)
            .ok_or_else(|| Error::UnknownScheme(format!("no scheme configured for {}", kind)))
    }

    pub fn ladder(&self) -> TierLadder {
        self.ladder
    }

    pub fn scoring_engine(&self, scheme: &ScoringScheme) -> ScoringEngine {
        ScoringEngine::new(scheme.clone(), self.ladder)
    }

    pub fn similarity(&self) -> &SimilarityEngine {
        &self.similarity
    }

    pub fn surge_thresholds(&self, context: &str) -> Result<SurgeThresholds> {
        self.surge
            .get(context)
            .copied()
            .ok_or_else(|| Error::UnknownSurgeContext(context.to_string()))
    }

    pub fn surge_contexts(&self) -> impl Iterator<Item = &str> {
        self.surge.keys().map(String::as_str)
    }
}

use super::DatasetSource;
use crate::core::{EntityKind, ScorableEntity};
use crate::errors::{Error, Result};
use crate::surge::PeriodPair;
use std::collections::BTreeMap;

/// Dataset held in memory, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    entities: BTreeMap<EntityKind, Vec<ScorableEntity>>,
    period_pairs: BTreeMap<String, Vec<PeriodPair>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add entities, filed under each entity's own kind.
    pub fn with_entities(mut self, entities: impl IntoIterator<Item = ScorableEntity>) -> Self {
        for entity in entities {
            self.entities.entry(entity.kind).or_default().push(entity);
        }
        self
    }

    pub fn with_period_pairs(mut self, dataset: impl Into<String>, pairs: Vec<PeriodPair>) -> Self {
        self.period_pairs.insert(dataset.into(), pairs);
        self
    }
}

impl DatasetSource for InMemorySource {
    /// A kind with no records is an empty dataset, not an error.
    fn entities(&self, kind: EntityKind) -> Result<Vec<ScorableEntity>> {
        Ok(self.entities.get(&kind).cloned().unwrap_or_default())
    }

    fn period_pairs(&self, dataset: &str) -> Result<Vec<PeriodPair>> {
        self.period_pairs
            .get(dataset)
            .cloned()
            .ok_or_else(|| Error::Dataset {
                message: format!("no period-pair dataset named '{}'", dataset),
                path: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_are_filed_by_kind() {
        let source = InMemorySource::new().with_entities(vec![
            ScorableEntity::new("a", "A", EntityKind::Client),
            ScorableEntity::new("f", "F", EntityKind::Firm),
            ScorableEntity::new("b", "B", EntityKind::Client),
        ]);
        assert_eq!(source.entities(EntityKind::Client).unwrap().len(), 2);
        assert_eq!(source.entities(EntityKind::Firm).unwrap().len(), 1);
        assert!(source.entities(EntityKind::Issue).unwrap().is_empty());
    }

    #[test]
    fn unknown_period_dataset_is_an_error() {
        let source = InMemorySource::new()
            .with_period_pairs("issue_momentum", vec![PeriodPair::new("TAX", 1.0, 2.0)]);
        assert_eq!(source.period_pairs("issue_momentum").unwrap().len(), 1);
        assert!(source.period_pairs("client_trajectory").is_err());
    }
}

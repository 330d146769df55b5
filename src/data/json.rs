//! JSON dataset files on disk.
//!
//! A dataset directory holds one file per key: `clients.json`, `firms.json`,
//! `lobbyists.json`, `issues.json`, plus any number of period-pair files
//! such as `issue_momentum.json`. Each file is either a top-level array or an
//! object wrapping the array under `records`, `data` or `items`.

use super::records::{RawEntityRecord, RawPeriodPair};
use super::DatasetSource;
use crate::core::{EntityKind, ScorableEntity};
use crate::errors::{Error, Result};
use crate::surge::PeriodPair;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "data", alias = "items")]
        records: Vec<T>,
    },
}

impl<T> Envelope<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Envelope::Bare(records) | Envelope::Wrapped { records } => records,
        }
    }
}

/// Read a record file. Only the envelope must be well formed; a record that
/// does not deserialize is skipped with a warning.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::dataset(format!("cannot read {}: {}", path.display(), e), path))?;
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(&contents).map_err(|e| {
        Error::dataset(
            format!(
                "{} is not a record array (or {{\"records\": [...]}}): {}",
                path.display(),
                e
            ),
            path,
        )
    })?;
    let records = envelope
        .into_records()
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "malformed record skipped");
                None
            }
        })
        .collect();
    Ok(records)
}

/// Normalize raw records, dropping those without an id and repeated ids.
/// The first occurrence of an id wins.
pub(crate) fn normalize_records(
    raw: Vec<RawEntityRecord>,
    kind: EntityKind,
) -> Vec<ScorableEntity> {
    let mut seen = BTreeSet::new();
    let mut entities = Vec::with_capacity(raw.len());
    for (index, record) in raw.into_iter().enumerate() {
        match record.into_entity(kind) {
            Some(entity) if seen.insert(entity.id.clone()) => entities.push(entity),
            Some(entity) => warn!(id = %entity.id, %kind, "duplicate id, keeping first record"),
            None => warn!(index, %kind, "record without an id skipped"),
        }
    }
    entities
}

/// Period pairs from a standalone JSON file.
///
/// Values that do not parse load as absent; the classifier then excludes
/// those records rather than the file failing as a whole.
pub fn load_period_pairs_file(path: &Path) -> Result<Vec<PeriodPair>> {
    let raw = read_records::<RawPeriodPair>(path)?;
    let total = raw.len();
    let pairs: Vec<PeriodPair> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let pair = record.into_period_pair();
            if pair.is_none() {
                warn!(path = %path.display(), index, "period pair without a code skipped");
            }
            pair
        })
        .collect();
    debug!(
        path = %path.display(),
        records = total,
        kept = pairs.len(),
        "loaded period pairs"
    );
    Ok(pairs)
}

/// A directory of JSON dataset files.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::dataset(
                format!("dataset directory {} does not exist", root.display()),
                root,
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing a dataset key.
    pub fn dataset_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl DatasetSource for JsonDirectorySource {
    fn entities(&self, kind: EntityKind) -> Result<Vec<ScorableEntity>> {
        let path = self.dataset_path(kind.dataset_key());
        let raw = read_records::<RawEntityRecord>(&path)?;
        let total = raw.len();
        let entities = normalize_records(raw, kind);
        debug!(
            path = %path.display(),
            records = total,
            kept = entities.len(),
            "loaded entities"
        );
        Ok(entities)
    }

    fn period_pairs(&self, dataset: &str) -> Result<Vec<PeriodPair>> {
        load_period_pairs_file(&self.dataset_path(dataset))
    }
}

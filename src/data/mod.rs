//! Dataset access.
//!
//! The engines never read files themselves. Callers resolve records through a
//! [`DatasetSource`] and hand the engines plain in-memory slices, which keeps
//! the core testable with in-memory fixtures:
//!
//! ```rust
//! use lobbymap::core::{EntityKind, Metric, ScorableEntity};
//! use lobbymap::data::{DatasetSource, InMemorySource};
//!
//! let source = InMemorySource::new().with_entities(vec![
//!     ScorableEntity::new("acme", "Acme Corp", EntityKind::Client)
//!         .with_metric(Metric::TotalSpend, 1_200_000.0),
//! ]);
//! assert_eq!(source.entities(EntityKind::Client).unwrap().len(), 1);
//! ```
//!
//! Alternate key names found across dataset versions are resolved in
//! [`records`], before anything reaches the engines.

pub mod json;
pub mod memory;
pub mod records;

pub use json::{load_period_pairs_file, JsonDirectorySource};
pub use memory::InMemorySource;
pub use records::{RawEntityRecord, RawId, RawNumber, RawPeriodPair};

use crate::core::{EntityKind, ScorableEntity};
use crate::errors::Result;
use crate::surge::PeriodPair;

/// Read access to a precomputed dataset, keyed by name.
///
/// Implementations must be thread-safe (`Send + Sync`) so one source can
/// serve parallel computations.
pub trait DatasetSource: Send + Sync {
    /// All records of one entity kind, already normalized.
    fn entities(&self, kind: EntityKind) -> Result<Vec<ScorableEntity>>;

    /// Two-period records for a named surge dataset.
    fn period_pairs(&self, dataset: &str) -> Result<Vec<PeriodPair>>;
}

impl<T: DatasetSource + ?Sized> DatasetSource for &T {
    fn entities(&self, kind: EntityKind) -> Result<Vec<ScorableEntity>> {
        (**self).entities(kind)
    }

    fn period_pairs(&self, dataset: &str) -> Result<Vec<PeriodPair>> {
        (**self).period_pairs(dataset)
    }
}

//! Influence scoring, similar-entity ranking and surge classification for
//! lobbying disclosure datasets.
//!
//! The three engines are pure functions of their inputs:
//!
//! - [`scoring`]: cohort-relative 0-100 influence scores with tiers
//! - [`similarity`]: top-K related entities by shared geography and issues
//! - [`surge`]: period-over-period change bucketed into momentum categories
//!
//! Weights and thresholds come from [`config`]; datasets are read through
//! [`data`] and rendered through [`io`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod data;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod scoring;
pub mod similarity;
pub mod surge;

// Re-export commonly used types
pub use crate::core::{EntityId, EntityKind, Metric, ScorableEntity};

pub use crate::errors::{ConfigIssue, Error, Result};

pub use crate::config::{load_config, validate_config, LobbymapConfig, Methodology};

pub use crate::scoring::{
    score, InfluenceTier, MetricDimension, Score0To100, ScoreReport, ScoredEntity, ScoringEngine,
    ScoringScheme, TierLadder,
};

pub use crate::similarity::{similar, MatchFactor, SimilarityCandidate, SimilarityEngine};

pub use crate::surge::{classify, PeriodPair, SurgeCategory, SurgeRecord, SurgeReport, SurgeThresholds};

pub use crate::data::{DatasetSource, InMemorySource, JsonDirectorySource};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

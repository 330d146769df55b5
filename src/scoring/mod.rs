//! Entity influence scoring.
//!
//! Converts heterogeneous raw metrics into one comparable 0-100 influence
//! score per entity:
//!
//! 1. restrict to the cohort (top N by the scheme's seed metric),
//! 2. normalize each dimension against the cohort maximum with a
//!    power-law compression curve,
//! 3. combine the normalized dimensions with the scheme weights,
//! 4. assign a tier from the composite and rank the cohort.
//!
//! Scores are relative to the cohort they were computed in. A 70 among the
//! top 200 spenders is not comparable to a 70 computed over 50 entities.

pub mod engine;
pub mod normalize;
pub mod report;
pub mod scheme;
pub mod score_types;
pub mod tiers;

pub use engine::{score, DimensionScore, ScoredEntity, ScoringEngine};
pub use normalize::{cohort_max, normalize, COMPRESSION_EXPONENT};
pub use report::{ScoreReport, COHORT_NOTE};
pub use scheme::{MetricDimension, ScoringScheme, WEIGHT_SUM_TOLERANCE};
pub use score_types::Score0To100;
pub use tiers::{InfluenceTier, TierLadder};

//! "Similar entities" ranking by attribute overlap.
//!
//! A candidate's score is the sum of independent match signals against the
//! target: a fixed bonus for the same geography, plus one point per shared
//! issue code (or the Jaccard overlap, when configured). Candidates with no
//! point of similarity are never returned, so a short list is a real answer
//! rather than a padded one.

pub mod engine;
pub mod report;
pub mod signals;

pub use engine::{similar, RelatedEntities, SimilarityCandidate, SimilarityEngine};
pub use report::SimilarityReport;
pub use signals::{geography_signal, issue_overlap_signal, MatchFactor, OverlapMode};

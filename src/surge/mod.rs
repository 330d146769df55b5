//! Period-over-period surge classification.
//!
//! Each issue or entity arrives as a pair of snapshots (prior, current).
//! The classifier derives the percent change, buckets it on a threshold
//! ladder supplied by the caller, and keeps raw values alongside the derived
//! fields so no downstream view has to reclassify.
//!
//! A zero prior value has no meaningful percent change: such records are
//! new entrants and report `percent_change: null`.

pub mod classifier;
pub mod report;
pub mod thresholds;

pub use classifier::{
    classify, classify_record, percent_change, ExcludedRecord, ExclusionReason, PeriodPair,
    SurgeCategory, SurgeRecord,
};
pub use report::SurgeReport;
pub use thresholds::SurgeThresholds;

//! Methodology configuration.
//!
//! Weight tables, tier thresholds, surge cutoffs and similarity settings are
//! configuration rather than constants, so that a methodology change is a
//! reviewable edit to one file. Every displayed score is stamped with
//! `methodology_version`.
//!
//! Raw TOML structures live here; [`validation::validate_config`] turns them
//! into a [`Methodology`] of validated engine inputs, reporting every
//! problem at once.

mod core;
mod loader;
mod methodology;
mod scoring;
mod similarity;
mod thresholds;
pub mod validation;

pub use self::core::{default_methodology_version, LobbymapConfig};
pub use loader::{
    default_config_toml, directory_ancestors, discover_config_path, load_config,
    load_config_from_path, parse_config, CONFIG_FILE_NAME,
};
pub use methodology::Methodology;
pub use scoring::{DimensionConfig, SchemeConfig};
pub use similarity::SimilarityConfig;
pub use thresholds::{SurgeThresholdConfig, TierThresholdConfig};
pub use validation::{validate_config, validate_config_result, ConfigValidation};

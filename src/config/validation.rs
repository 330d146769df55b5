//! Validation with error accumulation for configuration.
//!
//! Uses stillwater's `Validation` type to collect ALL configuration issues
//! instead of stopping at the first one, so a broken methodology file is
//! fixed in one pass.
//!
//! # Example
//!
//! ```rust
//! use lobbymap::config::{validate_config, LobbymapConfig};
//!
//! let config = LobbymapConfig::default();
//! assert!(validate_config(&config).is_success());
//! ```

use std::collections::{BTreeMap, BTreeSet};

use stillwater::{NonEmptyVec, Validation};

use super::core::LobbymapConfig;
use super::methodology::Methodology;
use crate::errors::{ConfigIssue, Error, Result};
use crate::similarity::SimilarityEngine;

/// Validation result carrying every issue found.
pub type ConfigValidation<T> = Validation<T, NonEmptyVec<ConfigIssue>>;

/// Validate the entire config, accumulating ALL issues.
pub fn validate_config(config: &LobbymapConfig) -> ConfigValidation<Methodology> {
    let mut issues = Vec::new();

    if config.methodology_version.trim().is_empty() {
        issues.push(ConfigIssue::new("methodology_version", "must not be empty"));
    }

    let mut names = BTreeSet::new();
    for scheme in &config.schemes {
        if !names.insert(scheme.name.as_str()) {
            issues.push(ConfigIssue::new(
                format!("schemes.{}", scheme.name),
                "scheme name is used more than once",
            ));
        }
    }
    let schemes = config
        .schemes
        .iter()
        .filter_map(|scheme| {
            let field = format!("schemes.{}", scheme.name);
            collect(scheme.build(), &field, &mut issues)
        })
        .collect();

    let ladder = collect(config.tiers.build(), "tiers", &mut issues).unwrap_or_default();

    let surge: BTreeMap<_, _> = config
        .surge
        .iter()
        .filter_map(|(context, thresholds)| {
            let field = format!("surge.{}", context);
            collect(thresholds.build(context), &field, &mut issues)
                .map(|built| (context.clone(), built))
        })
        .collect();

    let similarity = collect(
        SimilarityEngine::new(&config.similarity),
        "similarity",
        &mut issues,
    )
    .unwrap_or_default();

    accumulate(
        Methodology {
            version: config.methodology_version.clone(),
            schemes,
            ladder,
            surge,
            similarity,
        },
        issues,
    )
}

/// Validate config with a fail-fast `Result` API.
pub fn validate_config_result(config: &LobbymapConfig) -> Result<Methodology> {
    match validate_config(config) {
        Validation::Success(methodology) => Ok(methodology),
        Validation::Failure(issues) => Err(Error::Configuration(issues.into_vec())),
    }
}

fn collect<T>(result: Result<T>, field: &str, issues: &mut Vec<ConfigIssue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            issues.extend(err.into_issues(field));
            None
        }
    }
}

fn accumulate<T>(value: T, issues: Vec<ConfigIssue>) -> ConfigValidation<T> {
    let mut issues = issues.into_iter();
    match issues.next() {
        None => Validation::Success(value),
        Some(first) => Validation::Failure(NonEmptyVec::new(first, issues.collect())),
    }
}

//! Shared fixtures for integration tests.
#![allow(dead_code)]

use lobbymap::{EntityKind, Metric, MetricDimension, ScorableEntity, ScoringScheme};
use std::fs;
use std::path::Path;

pub fn client(id: &str, spend: f64, issue_count: f64) -> ScorableEntity {
    ScorableEntity::new(id, id.to_uppercase(), EntityKind::Client)
        .with_metric(Metric::TotalSpend, spend)
        .with_metric(Metric::IssueCount, issue_count)
}

/// The two-dimension scheme from the worked example: spend 0.6, issues 0.4.
pub fn spend_and_issues() -> ScoringScheme {
    ScoringScheme::new(
        "spend_and_issues",
        EntityKind::Client,
        Metric::TotalSpend,
        None,
        vec![
            MetricDimension::new(Metric::TotalSpend, 0.6),
            MetricDimension::new(Metric::IssueCount, 0.4),
        ],
    )
    .unwrap()
}

/// A, B and C from the worked example.
pub fn worked_example() -> Vec<ScorableEntity> {
    vec![
        client("c", 0.0, 0.0),
        client("b", 50.0, 1.0),
        client("a", 100.0, 5.0),
    ]
}

pub fn write_files(dir: &Path, files: &[(&str, &str)]) {
    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }
}

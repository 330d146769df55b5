//! Benchmarks for the three engines over synthetic datasets.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lobbymap::surge::PeriodPair;
use lobbymap::{
    classify, score, EntityKind, Metric, ScorableEntity, ScoringScheme, SimilarityEngine,
    SurgeThresholds,
};
use std::hint::black_box;

const STATES: [&str; 6] = ["TX", "CA", "NY", "FL", "VA", "DC"];
const ISSUES: [&str; 10] = [
    "TAX", "ENG", "HCR", "DEF", "TRD", "AGR", "BAN", "TEC", "TRA", "ENV",
];

fn synthetic_clients(count: usize) -> Vec<ScorableEntity> {
    (0..count)
        .map(|i| {
            let issues = (0..(i % 4 + 1)).map(|j| ISSUES[(i * 7 + j * 3) % ISSUES.len()]);
            ScorableEntity::new(format!("client-{}", i), format!("Client {}", i), EntityKind::Client)
                .with_metric(Metric::TotalSpend, ((i * 7919) % 5_000_000) as f64)
                .with_metric(Metric::RevolvingDoorCount, (i % 13) as f64)
                .with_metric(Metric::IssueCount, (i % 4 + 1) as f64)
                .with_metric(Metric::FilingCount, (i % 40) as f64)
                .with_metric(Metric::YearsActive, (i % 25) as f64)
                .with_state(STATES[i % STATES.len()])
                .with_issues(issues)
        })
        .collect()
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let scheme = ScoringScheme::client_influence();
    for size in [200, 2_000, 20_000] {
        let clients = synthetic_clients(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &clients, |b, clients| {
            b.iter(|| score(black_box(clients), black_box(&scheme)))
        });
    }
    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similar");
    let engine = SimilarityEngine::default();
    for size in [200, 1_000] {
        let clients = synthetic_clients(size);
        group.bench_with_input(BenchmarkId::new("one_target", size), &clients, |b, clients| {
            b.iter(|| engine.similar(black_box(&clients[0]), black_box(clients), 5))
        });
        group.bench_with_input(BenchmarkId::new("whole_pool", size), &clients, |b, clients| {
            b.iter(|| engine.related_all(black_box(clients), 5))
        });
    }
    group.finish();
}

fn bench_surge(c: &mut Criterion) {
    let pairs: Vec<PeriodPair> = (0..10_000)
        .map(|i| PeriodPair::new(format!("I{}", i), (i % 500) as f64, ((i * 31) % 900) as f64))
        .collect();
    let thresholds = SurgeThresholds::issue_momentum();
    c.bench_function("classify_10000", |b| {
        b.iter(|| classify(black_box(&pairs), black_box(&thresholds)))
    });
}

criterion_group!(benches, bench_scoring, bench_similarity, bench_surge);
criterion_main!(benches);

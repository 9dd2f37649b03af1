//! Benchmarks for safety scoring, graph annotation and route planning.
//!
//! Run with: cargo bench --package saferoute_core

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use geo::Point;
use saferoute_core::{
    AnalysisPoint, FeatureStore, RoadGraph, RoutePlanner, RoutingConfig, SafetyScorer,
    ScoringConfig, annotate, model::Proximity,
};

const STEP: f64 = 0.001;

/// Analysis points on a regular grid with alternating lit and dark cells.
fn feature_store(side: usize) -> FeatureStore {
    let points = (0..side * side)
        .map(|i| {
            let (row, col) = (i / side, i % side);
            let mut point = AnalysisPoint::new(Point::new(col as f64 * STEP, row as f64 * STEP));
            if (row + col) % 2 == 0 {
                point.street_light = Proximity::new(5.0, (i % 17) as u32);
            }
            point.nightlife.count = (i % 5) as u32;
            point
        })
        .collect();
    FeatureStore::new(points).expect("grid store is valid")
}

/// Two-way street grid with `side * side` intersections.
fn road_grid(side: usize) -> RoadGraph {
    let mut builder = RoadGraph::builder();
    for i in 0..side * side {
        let (row, col) = (i / side, i % side);
        builder
            .add_node(i as u64, Point::new(col as f64 * STEP, row as f64 * STEP))
            .expect("unique node");
    }
    for i in 0..side * side {
        let (row, col) = (i / side, i % side);
        if col + 1 < side {
            builder.add_road(i as u64, i as u64 + 1, Some(111.0), false).expect("known nodes");
        }
        if row + 1 < side {
            builder
                .add_road(i as u64, (i + side) as u64, Some(111.0), false)
                .expect("known nodes");
        }
    }
    builder.build()
}

fn scorer(side: usize) -> SafetyScorer {
    SafetyScorer::new(Arc::new(feature_store(side)), ScoringConfig::default())
        .expect("non-empty store")
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("SafetyScorer::score");

    for side in [20, 64, 128] {
        let scorer = scorer(side);
        let query = Point::new(side as f64 * STEP / 2.0, side as f64 * STEP / 3.0);
        group.bench_with_input(BenchmarkId::new("points", side * side), &side, |b, _| {
            b.iter(|| black_box(scorer.score(black_box(&query))))
        });
    }
    group.finish();
}

fn bench_annotate(c: &mut Criterion) {
    let scorer = scorer(64);
    let mut group = c.benchmark_group("annotate");
    group.sample_size(20);

    for side in [32, 100] {
        group.bench_with_input(BenchmarkId::new("intersections", side * side), &side, |b, &side| {
            b.iter_batched(
                || road_grid(side),
                |graph| annotate(graph, &scorer, 1e-6),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_plan_route(c: &mut Criterion) {
    let side = 100;
    let scorer = scorer(64);
    let graph = annotate(road_grid(side), &scorer, 1e-6).expect("grid has lengths");
    let planner = RoutePlanner::new(&graph, RoutingConfig::default()).expect("valid config");

    let origin = Point::new(0.0, 0.0);
    let destination = Point::new((side - 1) as f64 * STEP, (side - 1) as f64 * STEP);

    c.bench_function("RoutePlanner::plan_route corner to corner", |b| {
        b.iter(|| black_box(planner.plan_route(black_box(origin), black_box(destination))))
    });
}

criterion_group!(benches, bench_score, bench_annotate, bench_plan_route);
criterion_main!(benches);

//! Benchmarks for latency graph queries
//!
//! Run with: cargo bench -p latency-graph

#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use latency_graph::{EdgeTuple, LatencyGraph, StaticEdgeReader, TraversalEngine};
use std::hint::black_box;

/// Generate a ring `n_0 -> n_1 -> ... -> n_0` with a chord from every node to the one two ahead
fn generate_ring_graph(size: usize) -> Vec<EdgeTuple> {
    let name = |i: usize| format!("n_{}", i % size);
    (0..size)
        .flat_map(|i| {
            [
                EdgeTuple::new(name(i), name(i + 1), 1),
                EdgeTuple::new(name(i), name(i + 2), 3),
            ]
        })
        .collect()
}

/// Generate a cheap cycle next to a long chain of unit edges, both leading to `target`
fn generate_detour_graph(chain_length: usize) -> Vec<EdgeTuple> {
    let mut edges = vec![
        EdgeTuple::new("start", "loop", 15),
        EdgeTuple::new("loop", "start", 15),
        EdgeTuple::new("loop", "target", 15),
        EdgeTuple::new("start", "chain_0", 1),
    ];
    for i in 1..chain_length {
        edges.push(EdgeTuple::new(format!("chain_{}", i - 1), format!("chain_{i}"), 1));
    }
    edges.push(EdgeTuple::new(
        format!("chain_{}", chain_length - 1),
        "target",
        1,
    ));
    edges
}

fn engine_for(edges: &[EdgeTuple]) -> TraversalEngine<StaticEdgeReader> {
    TraversalEngine::with_graph(LatencyGraph::from_edges(edges))
}

fn benchmark_count_traces(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_traces");
    let engine = engine_for(&generate_ring_graph(20));

    for hops in [4, 8, 12] {
        group.bench_with_input(BenchmarkId::from_parameter(hops), &hops, |b, &hops| {
            b.iter(|| black_box(engine.count_traces("n_0", "n_0", hops, false).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_shortest_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_latency_detour");

    for length in [10, 20, 40] {
        let engine = engine_for(&generate_detour_graph(length));
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, _| {
            b.iter(|| {
                black_box(
                    engine
                        .find_shortest_latency_for_path("start", "target")
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn benchmark_paths_within_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths_within_latency");
    let engine = engine_for(&generate_ring_graph(20));

    for cap in [10, 20, 30] {
        group.bench_with_input(BenchmarkId::from_parameter(cap), &cap, |b, &cap| {
            b.iter(|| black_box(engine.count_paths_within_latency("n_0", "n_5", cap).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_graph_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_construction");

    for size in [100, 500, 1000] {
        let edges = generate_ring_graph(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &edges, |b, edges| {
            b.iter(|| black_box(LatencyGraph::from_edges(edges)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_count_traces,
    benchmark_shortest_latency,
    benchmark_paths_within_latency,
    benchmark_graph_construction,
);

criterion_main!(benches);

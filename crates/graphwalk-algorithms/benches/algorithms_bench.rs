//! Benchmarks for shortest paths and maximum flow.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use graphwalk_algorithms::{Algorithm, Dijkstra, EdmondsKarp, ReversedEdgeAugmentor};
use graphwalk_core::{AdjacencyGraph, Edge, TaggedEdge};

type Weighted = TaggedEdge<u32, u32>;

/// A `side` x `side` grid with right and down edges and varying weights.
fn grid(side: u32) -> AdjacencyGraph<u32, Weighted> {
    let mut edges = Vec::new();
    for row in 0..side {
        for col in 0..side {
            let v = row * side + col;
            if col + 1 < side {
                edges.push(TaggedEdge::new(v, v + 1, 1 + (v * 7) % 13));
            }
            if row + 1 < side {
                edges.push(TaggedEdge::new(v, v + side, 1 + (v * 11) % 17));
            }
        }
    }
    AdjacencyGraph::from_edges(true, edges)
}

fn weight(edge: &Weighted) -> f64 {
    f64::from(*edge.tag())
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_grid");
    for side in [10u32, 30, 60] {
        let graph = grid(side);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &graph, |b, graph| {
            b.iter(|| {
                let mut dijkstra = Dijkstra::new(graph, weight).with_root(0);
                dijkstra.compute().unwrap();
                black_box(dijkstra.distance(&(side * side - 1)))
            });
        });
    }
    group.finish();
}

fn bench_edmonds_karp(c: &mut Criterion) {
    let mut group = c.benchmark_group("edmonds_karp_grid");
    for side in [10u32, 20, 40] {
        let mut graph = grid(side);
        let mut reverser = ReversedEdgeAugmentor::new();
        reverser
            .augment(&mut graph, |e: &Weighted| {
                TaggedEdge::new(*e.target(), *e.source(), 0)
            })
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &graph, |b, graph| {
            b.iter(|| {
                let mut flow = EdmondsKarp::new(graph, weight, &reverser)
                    .with_source(0)
                    .with_sink(side * side - 1);
                flow.compute().unwrap();
                black_box(flow.max_flow())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dijkstra, bench_edmonds_karp);
criterion_main!(benches);

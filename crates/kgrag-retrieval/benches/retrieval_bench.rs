use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kgrag_core::graph::{Edge, KnowledgeGraph, Node};
use kgrag_retrieval::context::build_context;
use kgrag_retrieval::select_seeds;
use kgrag_retrieval::traversal::expand;

const DIMS: usize = 768;

/// Deterministic pseudo-random vector.
fn vector(seed: usize) -> Vec<f32> {
    (0..DIMS)
        .map(|i| (((seed * 31 + i * 17) % 97) as f32 / 97.0) - 0.5)
        .collect()
}

/// 500 nodes, each linked to its next 4 neighbors.
fn build_graph() -> KnowledgeGraph {
    let n = 500;
    let nodes = (0..n)
        .map(|i| Node::new(format!("n{i}"), format!("Node {i}"), 1).with_embedding(vector(i)))
        .collect();
    let edges = (0..n)
        .flat_map(|i| (1..=4).filter(move |j| i + j < n).map(move |j| (i, i + j)))
        .map(|(s, t)| Edge::new(format!("n{s}"), format!("n{t}"), "rel"))
        .collect();
    KnowledgeGraph::new(nodes, edges)
}

fn bench_select_seeds(c: &mut Criterion) {
    let graph = build_graph();
    let query = vector(12_345);
    c.bench_function("select_seeds_500x768_top5", |b| {
        b.iter(|| select_seeds(black_box(&query), black_box(&graph), 5))
    });
}

fn bench_expand(c: &mut Criterion) {
    let graph = build_graph();
    let seeds: Vec<String> = ["n10", "n250", "n400"].iter().map(|s| s.to_string()).collect();
    c.bench_function("expand_depth_3", |b| {
        b.iter(|| expand(black_box(&seeds), black_box(graph.edges()), 3))
    });
}

fn bench_full_retrieval(c: &mut Criterion) {
    let graph = build_graph();
    let query = vector(777);
    c.bench_function("seeds_expand_context", |b| {
        b.iter(|| {
            let selection = select_seeds(&query, &graph, 3);
            let ids: Vec<String> = selection.seeds().iter().map(|s| s.id.clone()).collect();
            let traversed = expand(&ids, graph.edges(), 2);
            build_context("bench", selection.seeds(), &traversed, &graph)
        })
    });
}

criterion_group!(benches, bench_select_seeds, bench_expand, bench_full_retrieval);
criterion_main!(benches);

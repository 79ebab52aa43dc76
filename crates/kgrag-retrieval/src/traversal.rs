//! Multi-source bounded-depth expansion over undirected edges.

use std::collections::HashSet;

use kgrag_core::graph::Edge;
use petgraph::graphmap::UnGraphMap;

/// Expand `seeds` by up to `depth` hops.
///
/// Returns every node reached within `depth` hops that is not itself a seed,
/// each exactly once. The result is in discovery order, but only membership
/// is meaningful. Edge direction is ignored; edges naming nodes that never
/// occur as seeds or neighbors simply contribute nothing.
pub fn expand(seeds: &[String], edges: &[Edge], depth: usize) -> Vec<String> {
    if depth == 0 || seeds.is_empty() {
        return Vec::new();
    }

    let mut graph: UnGraphMap<&str, ()> = UnGraphMap::with_capacity(edges.len(), edges.len());
    for edge in edges {
        graph.add_edge(edge.source.as_str(), edge.target.as_str(), ());
    }

    let mut visited: HashSet<&str> = seeds.iter().map(String::as_str).collect();
    let mut frontier: Vec<&str> = seeds.iter().map(String::as_str).collect();
    let mut discovered = Vec::new();

    for _ in 0..depth {
        let mut next = Vec::new();
        for &current in &frontier {
            if !graph.contains_node(current) {
                continue;
            }
            for neighbor in graph.neighbors(current) {
                if visited.insert(neighbor) {
                    discovered.push(neighbor.to_string());
                    next.push(neighbor);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    discovered
}

//! Linearizes seeds, traversed nodes, and their connecting edges into the text
//! block handed to the synthesis provider.
//!
//! The output depends only on the inputs: nodes follow graph order, edges
//! follow edge order, and scores print with four decimals.

use std::collections::HashSet;
use std::fmt::Write;

use kgrag_core::graph::KnowledgeGraph;

use crate::seeds::ScoredSeed;

/// Build the context block for `query`.
pub fn build_context(
    query: &str,
    seeds: &[ScoredSeed],
    traversed: &[String],
    graph: &KnowledgeGraph,
) -> String {
    let relevant: HashSet<&str> = seeds
        .iter()
        .map(|s| s.id.as_str())
        .chain(traversed.iter().map(String::as_str))
        .collect();

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Query: \"{query}\"");

    out.push_str("\nTop Matches (Vector Search):\n");
    for seed in seeds {
        let _ = writeln!(out, "- {} (Similarity: {:.4})", seed.label, seed.score);
    }

    out.push_str("\nRelevant Graph Context (Nodes):\n");
    for node in graph.nodes().iter().filter(|n| relevant.contains(n.id.as_str())) {
        match node.description.as_deref() {
            Some(description) => {
                let _ = writeln!(out, "- {} ({}): {}", node.id, node.label, description);
            }
            None => {
                let _ = writeln!(out, "- {} ({})", node.id, node.label);
            }
        }
    }

    out.push_str("\nRelevant Graph Context (Relationships):\n");
    for edge in graph
        .edges()
        .iter()
        .filter(|e| relevant.contains(e.source.as_str()) && relevant.contains(e.target.as_str()))
    {
        let _ = writeln!(out, "- {} --[{}]--> {}", edge.source, edge.label, edge.target);
    }

    out
}

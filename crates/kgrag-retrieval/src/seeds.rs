//! Seed selection: rank every embedded node against the query, keep the top K.

use kgrag_core::graph::KnowledgeGraph;
use kgrag_observability::tracing_setup::events;
use serde::Serialize;

use crate::similarity::cosine_similarity;

/// A node picked as a starting point for traversal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSeed {
    pub id: String,
    pub label: String,
    pub score: f32,
}

/// Outcome of seed selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSelection {
    /// At least one candidate was scored. Holds at most `top_k` seeds,
    /// best first.
    Seeds(Vec<ScoredSeed>),
    /// No node carries an embedding compatible with the query.
    NoEmbeddedCandidates,
}

impl SeedSelection {
    pub fn seeds(&self) -> &[ScoredSeed] {
        match self {
            Self::Seeds(seeds) => seeds,
            Self::NoEmbeddedCandidates => &[],
        }
    }
}

/// Score every embedded node and return the best `top_k`.
///
/// Ties keep graph node order. Nodes without an embedding are skipped, and
/// nodes whose embedding length differs from the query's are skipped with a
/// warning.
pub fn select_seeds(query: &[f32], graph: &KnowledgeGraph, top_k: usize) -> SeedSelection {
    let mut scored: Vec<ScoredSeed> = graph
        .nodes()
        .iter()
        .filter_map(|node| {
            let embedding = node.embedding()?;
            if embedding.len() != query.len() {
                events::candidate_excluded(&node.id, query.len(), embedding.len());
                return None;
            }
            Some(ScoredSeed {
                id: node.id.clone(),
                label: node.label.clone(),
                score: cosine_similarity(query, embedding),
            })
        })
        .collect();

    if scored.is_empty() {
        return SeedSelection::NoEmbeddedCandidates;
    }

    // `sort_by` is stable, so equal scores stay in graph order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    SeedSelection::Seeds(scored)
}

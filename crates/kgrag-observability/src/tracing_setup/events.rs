//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

use std::time::Duration;

/// Log a finished query.
pub fn query_completed(
    generation: u64,
    outcome: &str,
    seeds: usize,
    traversed: usize,
    latency: Duration,
) {
    tracing::info!(
        event = "query_completed",
        generation = generation,
        outcome = %outcome,
        seeds = seeds,
        traversed = traversed,
        latency_ms = latency.as_millis() as u64,
        "query completed"
    );
}

/// Log a query abandoned because a newer one started.
pub fn query_superseded(generation: u64, current: u64) {
    tracing::info!(
        event = "query_superseded",
        generation = generation,
        current = current,
        "query superseded"
    );
}

/// Log a node left without an embedding after ingestion.
pub fn node_embedding_failed(node_id: &str, reason: &str) {
    tracing::warn!(
        event = "node_embedding_failed",
        node_id = %node_id,
        reason = %reason,
        "node embedding failed"
    );
}

/// Log the end of an ingestion run.
pub fn ingestion_completed(embedded: usize, failed: usize, provider: &str) {
    tracing::info!(
        event = "ingestion_completed",
        embedded = embedded,
        failed = failed,
        provider = %provider,
        "ingestion completed"
    );
}

/// Log items discarded while loading a graph.
pub fn edges_dropped(dangling_edges: usize, duplicate_nodes: usize) {
    tracing::warn!(
        event = "edges_dropped",
        dangling_edges = dangling_edges,
        duplicate_nodes = duplicate_nodes,
        "invalid graph items dropped at load"
    );
}

/// Log a node excluded from seed candidacy.
pub fn candidate_excluded(node_id: &str, expected: usize, actual: usize) {
    tracing::warn!(
        event = "candidate_excluded",
        node_id = %node_id,
        expected_dims = expected,
        actual_dims = actual,
        "embedding dimension differs from query, node skipped"
    );
}

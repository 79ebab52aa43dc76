//! Ingestion fan-out: per-node outcomes, independence of failures, timeouts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kgrag_core::errors::{EmbeddingError, KgragResult};
use kgrag_core::graph::{KnowledgeGraph, Node};
use kgrag_core::traits::IEmbeddingProvider;
use kgrag_embeddings::{ingest, HashingEmbedder};
use test_fixtures::{load_graph, AI_HISTORY, CHAIN, PRECISION_MEDICINE};

/// Fails for any text mentioning "Turing", returns nothing for "Neural",
/// and hangs on "Deep".
struct FlakyProvider;

#[async_trait]
impl IEmbeddingProvider for FlakyProvider {
    async fn embed(&self, text: &str) -> KgragResult<Vec<f32>> {
        if text.contains("Turing") {
            return Err(EmbeddingError::ProviderFailed {
                provider: "flaky".into(),
                reason: "quota exceeded".into(),
            }
            .into());
        }
        if text.contains("Neural") {
            return Ok(Vec::new());
        }
        if text.contains("Deep") {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(vec![text.len() as f32, 1.0])
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

/// Fails every call.
struct DownProvider;

#[async_trait]
impl IEmbeddingProvider for DownProvider {
    async fn embed(&self, _text: &str) -> KgragResult<Vec<f32>> {
        Err(EmbeddingError::ProviderFailed {
            provider: "down".into(),
            reason: "service unavailable".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "down"
    }
}

/// Answers slower for earlier nodes so completion order is reversed.
struct ReverseOrderProvider;

#[async_trait]
impl IEmbeddingProvider for ReverseOrderProvider {
    async fn embed(&self, text: &str) -> KgragResult<Vec<f32>> {
        let rank: u64 = text[..1].parse().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(100 - rank * 10)).await;
        Ok(vec![rank as f32])
    }

    fn name(&self) -> &str {
        "reverse"
    }
}

#[tokio::test]
async fn hashing_provider_embeds_every_node() {
    let mut graph = load_graph(PRECISION_MEDICINE);
    let report = ingest(
        &mut graph,
        Arc::new(HashingEmbedder::new(64)),
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(report.embedded, graph.len());
    assert!(report.is_complete());
    assert_eq!(graph.embedded_count(), graph.len());
    assert!(graph.nodes().iter().all(|n| n.embedding().unwrap().len() == 64));
}

#[tokio::test(start_paused = true)]
async fn failing_nodes_do_not_block_siblings() {
    let mut graph = load_graph(AI_HISTORY);
    let report = ingest(&mut graph, Arc::new(FlakyProvider), Duration::from_secs(30)).await;

    // Turing errors, NN comes back empty, DL times out.
    assert_eq!(report.embedded, 2);
    assert_eq!(report.failed, vec!["DL", "NN", "Turing"]);
    assert!(graph.node("AI").unwrap().has_embedding());
    assert!(graph.node("ML").unwrap().has_embedding());
    assert!(!graph.node("DL").unwrap().has_embedding());
    assert!(!graph.node("NN").unwrap().has_embedding());
    assert!(!graph.node("Turing").unwrap().has_embedding());
}

#[tokio::test(start_paused = true)]
async fn results_attach_by_position_regardless_of_completion_order() {
    let nodes = (0..5)
        .map(|i| Node::new(format!("n{i}"), format!("{i} node"), 1))
        .collect();
    let mut graph = KnowledgeGraph::new(nodes, Vec::new());

    let report = ingest(&mut graph, Arc::new(ReverseOrderProvider), Duration::from_secs(1)).await;
    assert_eq!(report.embedded, 5);
    for (i, node) in graph.nodes().iter().enumerate() {
        assert_eq!(node.embedding(), Some(&[i as f32][..]));
    }
}

#[tokio::test]
async fn empty_graph_is_a_no_op() {
    let mut graph = KnowledgeGraph::default();
    let report = ingest(&mut graph, Arc::new(HashingEmbedder::new(8)), Duration::from_secs(1)).await;
    assert_eq!(report.embedded, 0);
    assert!(report.failed.is_empty());
}

#[tokio::test]
async fn failed_nodes_lose_preloaded_embeddings() {
    let mut graph = load_graph(CHAIN);
    assert_eq!(graph.embedded_count(), 3);

    let report = ingest(&mut graph, Arc::new(DownProvider), Duration::from_secs(1)).await;
    assert_eq!(report.embedded, 0);
    assert_eq!(report.failed, vec!["A", "B", "C", "D"]);
    assert_eq!(graph.embedded_count(), 0);
    assert!(graph.to_document().nodes.iter().all(|n| n.embedding.is_none()));
}

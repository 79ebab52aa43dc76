//! Graph ingestion: embed every node of a freshly loaded graph.
//!
//! One task per node on a `JoinSet`. Each result is attached to its own node
//! by position, so completion order does not matter, and a failing node never
//! cancels its siblings.

use std::sync::Arc;
use std::time::Duration;

use kgrag_core::graph::KnowledgeGraph;
use kgrag_core::traits::IEmbeddingProvider;
use kgrag_observability::tracing_setup::events;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::providers::embed_with_timeout;

/// Per-run ingestion summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestionReport {
    /// Nodes that received a vector.
    pub embedded: usize,
    /// Ids of nodes left without a vector, in graph order.
    pub failed: Vec<String>,
}

impl IngestionReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Embed all nodes of `graph` concurrently and attach the vectors in place.
///
/// Each call is bounded by `timeout`. Failed, timed-out, or empty responses
/// leave the node without an embedding, even one it carried before ingestion,
/// and are listed in the report.
pub async fn ingest(
    graph: &mut KnowledgeGraph,
    provider: Arc<dyn IEmbeddingProvider>,
    timeout: Duration,
) -> IngestionReport {
    let span = kgrag_observability::ingestion_span!(provider.name(), graph.len());

    async {
        let mut tasks = JoinSet::new();
        for (position, node) in graph.nodes().iter().enumerate() {
            let provider = Arc::clone(&provider);
            let text = node.embedding_text();
            tasks.spawn(async move {
                let result = embed_with_timeout(provider.as_ref(), &text, timeout).await;
                (position, result)
            });
        }

        let mut outcomes: Vec<Option<Result<Vec<f32>, String>>> = vec![None; graph.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, result)) => {
                    outcomes[position] = Some(result.map_err(|e| e.to_string()));
                }
                Err(e) => tracing::error!(error = %e, "ingestion task aborted"),
            }
        }

        let mut report = IngestionReport::default();
        for (position, outcome) in outcomes.into_iter().enumerate() {
            let node_id = graph.nodes()[position].id.clone();
            match outcome {
                Some(Ok(vector)) => {
                    graph.set_embedding(position, vector);
                    report.embedded += 1;
                }
                Some(Err(reason)) => {
                    graph.clear_embedding(position);
                    events::node_embedding_failed(&node_id, &reason);
                    report.failed.push(node_id);
                }
                None => {
                    graph.clear_embedding(position);
                    events::node_embedding_failed(&node_id, "task aborted");
                    report.failed.push(node_id);
                }
            }
        }

        events::ingestion_completed(report.embedded, report.failed.len(), provider.name());
        report
    }
    .instrument(span)
    .await
}

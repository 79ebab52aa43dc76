//! GraphRagEngine: owns the loaded graph, the providers, and the insight
//! channel, and runs one query at a time through the full pipeline.
//!
//! embed query → select seeds → traverse → build context → synthesize.
//!
//! Starting a query supersedes the one in flight. The older query stops at
//! its next suspension point or publication and resolves to
//! [`KgragError::Superseded`].

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use kgrag_core::config::{PipelineConfig, QueryConfig};
use kgrag_core::errors::{KgragError, KgragResult};
use kgrag_core::graph::{GraphDocument, KnowledgeGraph};
use kgrag_core::models::{RetrievalOutcome, RetrievalResult, SynthesisRequest};
use kgrag_core::traits::{IEmbeddingProvider, ISynthesisProvider};
use kgrag_embeddings::{embed_with_timeout, ingest, CachedEmbedder, IngestionReport};
use kgrag_observability::tracing_setup::events;
use kgrag_observability::{QueryLog, QueryLogEntry};
use tokio::sync::watch;
use tracing::{info, warn, Instrument};

use crate::context::build_context;
use crate::insight::{InsightEvent, InsightPublisher, InsightState};
use crate::pacing::{Pacer, SleepPacer};
use crate::pipeline::{PipelineStage, StageTracker};
use crate::seeds::{select_seeds, SeedSelection};
use crate::synthesis::{generate_with_timeout, system_instructions};
use crate::traversal::expand;

// --- Canned results ---
pub const EMBEDDING_FAILED_ANSWER: &str =
    "I failed to calculate embeddings. Please check API quota.";
pub const EMBEDDING_FAILED_REASONING: &str = "Embedding Generation Failed.";
pub const NO_EMBEDDINGS_ANSWER: &str = "The graph nodes do not have embeddings calculated yet. \
Please regenerate or reload the graph to enable vector search.";
pub const NO_EMBEDDINGS_REASONING: &str = "Missing Node Embeddings.";
pub const SYNTHESIS_FAILED_ANSWER: &str = "Error generating answer from context.";
pub const SYNTHESIS_FAILED_REASONING: &str = "Synthesis failed.";

/// Handle a running query uses to notice it has been superseded.
struct QueryToken {
    generation: u64,
    rx: watch::Receiver<u64>,
}

impl QueryToken {
    fn current(&self) -> u64 {
        *self.rx.borrow()
    }

    fn superseded(&self) -> KgragError {
        KgragError::Superseded {
            generation: self.generation,
            current: self.current(),
        }
    }

    fn check(&self) -> KgragResult<()> {
        if self.current() == self.generation {
            Ok(())
        } else {
            Err(self.superseded())
        }
    }

    /// Run `fut` unless a newer query starts first.
    async fn race<F: Future>(&mut self, fut: F) -> KgragResult<F::Output> {
        let generation = self.generation;
        let output = tokio::select! {
            biased;
            _ = self.rx.wait_for(|g| *g != generation) => None,
            out = fut => Some(out),
        };
        output.ok_or_else(|| self.superseded())
    }
}

/// The retrieval engine.
pub struct GraphRagEngine {
    embedder: Arc<dyn IEmbeddingProvider>,
    query_embedder: CachedEmbedder,
    synthesizer: Arc<dyn ISynthesisProvider>,
    pacer: Arc<dyn Pacer>,
    config: PipelineConfig,
    graph: watch::Sender<Arc<KnowledgeGraph>>,
    generation: watch::Sender<u64>,
    insight: InsightPublisher,
    query_log: Mutex<QueryLog>,
}

impl GraphRagEngine {
    /// Create an engine with an empty graph. Pacing follows
    /// `config.phase_pause_ms`.
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        synthesizer: Arc<dyn ISynthesisProvider>,
        config: PipelineConfig,
    ) -> Self {
        let (graph, _) = watch::channel(Arc::new(KnowledgeGraph::default()));
        let (generation, _) = watch::channel(0);
        Self {
            query_embedder: CachedEmbedder::new(Arc::clone(&embedder), config.query_cache_size),
            embedder,
            synthesizer,
            pacer: Arc::new(SleepPacer::new(config.phase_pause())),
            query_log: Mutex::new(QueryLog::with_capacity(config.query_log_capacity)),
            config,
            graph,
            generation,
            insight: InsightPublisher::new(),
        }
    }

    /// Replace the pacer, e.g. with [`crate::NoPacing`] in tests.
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Build a graph from `document`, embed every node, and make it current.
    pub async fn load_graph(&self, document: GraphDocument) -> IngestionReport {
        let mut graph = KnowledgeGraph::from_document(document);
        let report = graph.load_report();
        if !report.is_clean() {
            events::edges_dropped(report.dangling_edges.len(), report.duplicate_nodes.len());
        }

        let ingestion = ingest(
            &mut graph,
            Arc::clone(&self.embedder),
            self.config.provider_timeout(),
        )
        .await;
        self.install_graph(graph);
        ingestion
    }

    /// Make `graph` current as is, keeping whatever embeddings it carries.
    pub fn install_graph(&self, graph: KnowledgeGraph) {
        info!(
            nodes = graph.len(),
            edges = graph.edges().len(),
            embedded = graph.embedded_count(),
            "graph installed"
        );
        self.graph.send_replace(Arc::new(graph));
    }

    /// Snapshot of the current graph.
    pub fn graph(&self) -> Arc<KnowledgeGraph> {
        Arc::clone(&self.graph.borrow())
    }

    /// Observe query progress.
    pub fn subscribe(&self) -> watch::Receiver<InsightState> {
        self.insight.subscribe()
    }

    /// Latest published progress state.
    pub fn insight(&self) -> InsightState {
        self.insight.snapshot()
    }

    /// Copy of the query history.
    pub fn query_log(&self) -> QueryLog {
        match self.query_log.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Answer `query` against the current graph.
    ///
    /// Provider failures are folded into the result's outcome. Errors are
    /// reserved for invalid config and for queries superseded by a newer one.
    pub async fn query(&self, query: &str, config: &QueryConfig) -> KgragResult<RetrievalResult> {
        config.validate()?;

        let mut generation = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            generation = *g;
        });
        self.insight.reset(generation);

        let token = QueryToken {
            generation,
            rx: self.generation.subscribe(),
        };
        let span = kgrag_observability::retrieval_span!(generation, config.top_k, config.graph_depth);
        let started = Instant::now();
        let mut stage = StageTracker::new();

        let result = self
            .run(query, config, token, &mut stage)
            .instrument(span)
            .await;

        match &result {
            Ok(result) => {
                stage.advance(PipelineStage::Done);
                let latency = started.elapsed();
                events::query_completed(
                    generation,
                    result.outcome.as_str(),
                    result.seed_node_ids.len(),
                    result.traversed_node_ids.len(),
                    latency,
                );
                let entry = QueryLogEntry::new(generation, query, result, latency);
                match self.query_log.lock() {
                    Ok(mut log) => log.record(entry),
                    Err(poisoned) => poisoned.into_inner().record(entry),
                }
            }
            Err(KgragError::Superseded { current, .. }) => {
                stage.advance(PipelineStage::Error);
                events::query_superseded(generation, *current);
            }
            Err(e) => {
                stage.advance(PipelineStage::Error);
                warn!(generation, error = %e, "query failed");
            }
        }
        result
    }

    async fn run(
        &self,
        query: &str,
        config: &QueryConfig,
        mut token: QueryToken,
        stage: &mut StageTracker,
    ) -> KgragResult<RetrievalResult> {
        let generation = token.generation;
        let graph = self.graph();
        let timeout = self.config.provider_timeout();

        // --- Embed the query ---
        stage.advance(PipelineStage::EmbeddingQuery);
        self.publish(&token, InsightEvent::Started)?;

        let embedded = token
            .race(embed_with_timeout(&self.query_embedder, query, timeout))
            .await?;
        let query_vector = match embedded {
            Ok(vector) => vector,
            Err(e) => {
                warn!(error = %e, "query embedding failed");
                return self.finish(
                    &token,
                    RetrievalResult::empty(
                        RetrievalOutcome::EmbeddingFailed,
                        EMBEDDING_FAILED_ANSWER,
                        EMBEDDING_FAILED_REASONING,
                    ),
                );
            }
        };

        // --- Select seeds ---
        stage.advance(PipelineStage::Scoring);
        let seeds = match select_seeds(&query_vector, &graph, config.top_k) {
            SeedSelection::Seeds(seeds) => seeds,
            SeedSelection::NoEmbeddedCandidates => {
                warn!(nodes = graph.len(), "no embedded nodes to search");
                return self.finish(
                    &token,
                    RetrievalResult::empty(
                        RetrievalOutcome::NoEmbeddedCandidates,
                        NO_EMBEDDINGS_ANSWER,
                        NO_EMBEDDINGS_REASONING,
                    ),
                );
            }
        };
        let seed_ids: Vec<String> = seeds.iter().map(|s| s.id.clone()).collect();

        // --- Traverse ---
        stage.advance(PipelineStage::Traversing);
        let traversed = expand(&seed_ids, graph.edges(), config.graph_depth);
        tracing::debug!(
            generation,
            seeds = seed_ids.len(),
            traversed = traversed.len(),
            "retrieval complete"
        );

        self.publish(
            &token,
            InsightEvent::SeedsSelected {
                seeds: seed_ids.clone(),
                traversed_count: traversed.len(),
            },
        )?;
        token.race(self.pacer.pause()).await?;
        self.publish(
            &token,
            InsightEvent::Traversed {
                traversed: traversed.clone(),
            },
        )?;
        token.race(self.pacer.pause()).await?;

        // --- Build context ---
        stage.advance(PipelineStage::BuildingContext);
        let context = build_context(query, &seeds, &traversed, &graph);

        // --- Synthesize ---
        stage.advance(PipelineStage::Synthesizing);
        self.publish(&token, InsightEvent::SynthesisStarted)?;

        let request = SynthesisRequest {
            system_instructions: system_instructions(config.response_style),
            context,
            style: config.response_style,
            model: config.synthesis_model,
        };
        let span = kgrag_observability::synthesis_span!(
            self.synthesizer.name(),
            config.synthesis_model
        );
        let generated = token
            .race(
                generate_with_timeout(self.synthesizer.as_ref(), &request, timeout).instrument(span),
            )
            .await?;

        let result = match generated {
            Ok(response) => RetrievalResult {
                seed_node_ids: seed_ids,
                traversed_node_ids: traversed,
                answer: response.answer,
                reasoning: format!(
                    "{}\n\n[Model: {}] [Style: {}]",
                    response.reasoning, config.synthesis_model, config.response_style
                ),
                outcome: RetrievalOutcome::Answered,
            },
            Err(e) => {
                warn!(error = %e, "synthesis failed");
                RetrievalResult {
                    seed_node_ids: seed_ids,
                    traversed_node_ids: traversed,
                    answer: SYNTHESIS_FAILED_ANSWER.to_string(),
                    reasoning: SYNTHESIS_FAILED_REASONING.to_string(),
                    outcome: RetrievalOutcome::SynthesisFailed,
                }
            }
        };
        self.finish(&token, result)
    }

    fn publish(&self, token: &QueryToken, event: InsightEvent) -> KgragResult<()> {
        token.check()?;
        self.insight.publish(token.generation, event)
    }

    fn finish(&self, token: &QueryToken, result: RetrievalResult) -> KgragResult<RetrievalResult> {
        self.publish(
            token,
            InsightEvent::Finished {
                reasoning: result.reasoning.clone(),
            },
        )?;
        Ok(result)
    }
}

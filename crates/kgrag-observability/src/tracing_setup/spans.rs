//! Span definitions per operation: retrieval, ingestion, synthesis.

/// Create a retrieval span for one query.
#[macro_export]
macro_rules! retrieval_span {
    ($generation:expr, $top_k:expr, $depth:expr) => {
        tracing::info_span!(
            "kgrag.retrieval",
            generation = $generation,
            top_k = $top_k,
            graph_depth = $depth
        )
    };
}

/// Create an ingestion span for one graph load.
#[macro_export]
macro_rules! ingestion_span {
    ($provider:expr, $node_count:expr) => {
        tracing::info_span!("kgrag.ingestion", provider = %$provider, node_count = $node_count)
    };
}

/// Create a synthesis span.
#[macro_export]
macro_rules! synthesis_span {
    ($provider:expr, $model:expr) => {
        tracing::info_span!("kgrag.synthesis", provider = %$provider, model = %$model)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "kgrag.retrieval";
    pub const INGESTION: &str = "kgrag.ingestion";
    pub const SYNTHESIS: &str = "kgrag.synthesis";
}

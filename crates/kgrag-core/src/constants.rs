/// kgrag version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bounds on the number of seed nodes a query may request.
pub const MIN_TOP_K: usize = 1;
pub const MAX_TOP_K: usize = 10;

/// Bounds on the number of traversal hops a query may request.
pub const MIN_GRAPH_DEPTH: usize = 1;
pub const MAX_GRAPH_DEPTH: usize = 3;

/// Environment variable read for the tracing filter.
pub const LOG_ENV_VAR: &str = "KGRAG_LOG";

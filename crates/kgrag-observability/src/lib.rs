//! # kgrag-observability
//!
//! Structured tracing setup, span and event helpers, and the in-memory query log.
//!
//! ## Architecture
//!
//! ```text
//! kgrag-observability
//! ├── tracing_setup
//! │   ├── init_tracing (env-filter, plain or JSON)
//! │   ├── spans (retrieval / ingestion / synthesis)
//! │   └── events (query_completed, node_embedding_failed, ...)
//! └── QueryLog (bounded history of answered queries)
//! ```

pub mod query_log;
pub mod tracing_setup;

pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};

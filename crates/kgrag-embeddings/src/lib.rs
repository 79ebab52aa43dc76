//! # kgrag-embeddings
//!
//! Embedding providers, the query-embedding cache, and the ingestion fan-out
//! that attaches a vector to every node of a freshly loaded graph.
//!
//! ## Architecture
//!
//! ```text
//! kgrag-embeddings
//! ├── providers
//! │   ├── GeminiEmbedder (REST embedContent)
//! │   └── HashingEmbedder (offline, always available)
//! ├── CachedEmbedder (moka, blake3 keys; wraps any provider)
//! └── ingestion (JoinSet fan-out, one task per node)
//! ```

pub mod cache;
pub mod ingestion;
pub mod providers;

pub use cache::CachedEmbedder;
pub use ingestion::{ingest, IngestionReport};
pub use providers::{create_embedder, embed_with_timeout, GeminiEmbedder, HashingEmbedder};

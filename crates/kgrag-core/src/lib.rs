//! # kgrag-core
//!
//! Foundation crate for kgrag.
//! Defines the knowledge graph model, provider traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod graph;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{KgragConfig, QueryConfig};
pub use errors::{KgragError, KgragResult};
pub use graph::{Edge, GraphDocument, KnowledgeGraph, Node};
pub use models::{RetrievalOutcome, RetrievalResult};

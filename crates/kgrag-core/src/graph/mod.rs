//! The in-memory knowledge graph: nodes, undirected labelled edges, and the
//! JSON document they are loaded from.

mod document;
mod edge;
mod knowledge_graph;
mod node;

pub use document::GraphDocument;
pub use edge::Edge;
pub use knowledge_graph::{KnowledgeGraph, LoadReport};
pub use node::Node;

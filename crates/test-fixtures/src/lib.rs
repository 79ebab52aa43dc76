//! Test fixture loader for kgrag graph datasets.
//!
//! Fixture graphs live under `graphs/` next to this crate's manifest and use
//! the same JSON shape the CLI loads.

use std::path::PathBuf;

use kgrag_core::graph::{GraphDocument, KnowledgeGraph};
use serde::de::DeserializeOwned;

/// The AI history graph: five concepts, four relations, one node without a description.
pub const AI_HISTORY: &str = "graphs/ai_history.json";
/// A four-node chain `A - B - C - D` with 3-dim unit embeddings on A, B, C and one dangling edge.
pub const CHAIN: &str = "graphs/chain.json";
/// The precision medicine sample: diseases, drugs, genes, phenotypes, risk factors.
pub const PRECISION_MEDICINE: &str = "graphs/precision_medicine.json";
/// A film subset: movies, directors and actors, genres, studios and themes.
pub const MOVIES: &str = "graphs/movies.json";
/// A biopsychosocial mental-health graph: disorders and their biological,
/// psychological and social factors.
pub const MENTAL_HEALTH: &str = "graphs/mental_health.json";

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).exists()
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture graph document without validation.
pub fn load_document(relative_path: &str) -> GraphDocument {
    load_fixture(relative_path)
}

/// Load a fixture graph, dropping duplicates and dangling edges.
pub fn load_graph(relative_path: &str) -> KnowledgeGraph {
    KnowledgeGraph::from_document(load_document(relative_path))
}

/// List all graph fixtures.
pub fn list_graphs() -> Vec<PathBuf> {
    let dir = fixtures_root().join("graphs");
    std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect()
}

use serde::{Deserialize, Serialize};

/// How a query ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalOutcome {
    /// Retrieval and synthesis both succeeded.
    Answered,
    /// The query could not be embedded; nothing was retrieved.
    EmbeddingFailed,
    /// No node in the graph carries an embedding.
    NoEmbeddedCandidates,
    /// Retrieval succeeded but the answer could not be generated.
    SynthesisFailed,
}

impl RetrievalOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Answered => "answered",
            Self::EmbeddingFailed => "embedding_failed",
            Self::NoEmbeddedCandidates => "no_embedded_candidates",
            Self::SynthesisFailed => "synthesis_failed",
        }
    }
}

/// The answer to one query plus the graph nodes it was grounded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Seeds in similarity order; at most `top_k`.
    pub seed_node_ids: Vec<String>,
    /// Nodes reached by traversal. Disjoint from the seeds; order carries no meaning.
    pub traversed_node_ids: Vec<String>,
    pub answer: String,
    pub reasoning: String,
    pub outcome: RetrievalOutcome,
}

impl RetrievalResult {
    /// A result with nothing retrieved.
    pub fn empty(
        outcome: RetrievalOutcome,
        answer: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            seed_node_ids: Vec::new(),
            traversed_node_ids: Vec::new(),
            answer: answer.into(),
            reasoning: reasoning.into(),
            outcome,
        }
    }

    /// Seeds followed by traversed nodes.
    pub fn retrieved_node_ids(&self) -> Vec<String> {
        self.seed_node_ids
            .iter()
            .chain(&self.traversed_node_ids)
            .cloned()
            .collect()
    }
}

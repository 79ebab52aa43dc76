use serde::{Deserialize, Serialize};

/// A knowledge graph entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique key referenced by edges.
    pub id: String,
    pub label: String,
    /// Small integer category, resolved to a name through the graph legend.
    #[serde(default)]
    pub group: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present only after successful ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, group: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            group,
            description: None,
            embedding: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Text sent to the embedding provider: `"<label>: <description>"`.
    pub fn embedding_text(&self) -> String {
        format!(
            "{}: {}",
            self.label,
            self.description.as_deref().unwrap_or_default()
        )
    }

    /// The node's vector, if it carries a non-empty one.
    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref().filter(|v| !v.is_empty())
    }

    pub fn has_embedding(&self) -> bool {
        self.embedding().is_some()
    }
}

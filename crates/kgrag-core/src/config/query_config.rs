use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{MAX_GRAPH_DEPTH, MAX_TOP_K, MIN_GRAPH_DEPTH, MIN_TOP_K};
use crate::errors::ConfigError;

/// How seed nodes are found.
///
/// Only vector similarity is wired through the pipeline, so it is the only
/// accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMethod {
    #[default]
    VectorSimilarity,
}

impl RetrievalMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::VectorSimilarity => "Vector Similarity",
        }
    }
}

/// Embedding model used for node and query vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmbeddingModel {
    #[default]
    #[serde(rename = "text-embedding-004")]
    TextEmbedding004,
}

impl EmbeddingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextEmbedding004 => "text-embedding-004",
        }
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model choice handed to the synthesis provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SynthesisModel {
    #[default]
    #[serde(rename = "gemini-2.5-flash")]
    GeminiFlash,
    #[serde(rename = "gemini-2.5-flash-thinking")]
    GeminiFlashThinking,
}

impl SynthesisModel {
    /// The configured name, as shown to users and echoed in reasoning.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeminiFlash => "gemini-2.5-flash",
            Self::GeminiFlashThinking => "gemini-2.5-flash-thinking",
        }
    }

    /// The model name actually sent to the API. The thinking variant is a
    /// selection on the same endpoint.
    pub fn api_model(&self) -> &'static str {
        match self {
            Self::GeminiFlash | Self::GeminiFlashThinking => "gemini-2.5-flash",
        }
    }
}

impl fmt::Display for SynthesisModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer style. Only affects provider call parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStyle {
    #[default]
    Concise,
    Detailed,
    Scientific,
}

impl ResponseStyle {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Concise => "Concise & Direct",
            Self::Detailed => "Detailed & Explanatory",
            Self::Scientific => "Scientific & Technical",
        }
    }

    /// Generation temperature for this style.
    pub fn temperature(&self) -> f32 {
        match self {
            Self::Detailed => 0.5,
            Self::Concise | Self::Scientific => 0.3,
        }
    }
}

impl fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Per-query retrieval settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Number of seed nodes selected by similarity.
    pub top_k: usize,
    /// Number of traversal hops from the seeds.
    pub graph_depth: usize,
    pub retrieval_method: RetrievalMethod,
    pub embedding_model: EmbeddingModel,
    pub synthesis_model: SynthesisModel,
    pub response_style: ResponseStyle,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            graph_depth: defaults::DEFAULT_GRAPH_DEPTH,
            retrieval_method: RetrievalMethod::default(),
            embedding_model: EmbeddingModel::default(),
            synthesis_model: SynthesisModel::default(),
            response_style: ResponseStyle::default(),
        }
    }
}

impl QueryConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_graph_depth(mut self, graph_depth: usize) -> Self {
        self.graph_depth = graph_depth;
        self
    }

    pub fn with_response_style(mut self, style: ResponseStyle) -> Self {
        self.response_style = style;
        self
    }

    pub fn with_synthesis_model(mut self, model: SynthesisModel) -> Self {
        self.synthesis_model = model;
        self
    }

    /// Reject `top_k` and `graph_depth` values outside their bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("top_k", self.top_k, MIN_TOP_K, MAX_TOP_K)?;
        check_range(
            "graph_depth",
            self.graph_depth,
            MIN_GRAPH_DEPTH,
            MAX_GRAPH_DEPTH,
        )
    }
}

fn check_range(
    field: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(QueryConfig::default().validate().is_ok());
    }

    #[test]
    fn top_k_bounds() {
        assert!(QueryConfig::default().with_top_k(0).validate().is_err());
        assert!(QueryConfig::default().with_top_k(10).validate().is_ok());
        assert!(QueryConfig::default().with_top_k(11).validate().is_err());
    }

    #[test]
    fn graph_depth_bounds() {
        assert!(QueryConfig::default().with_graph_depth(0).validate().is_err());
        assert!(QueryConfig::default().with_graph_depth(3).validate().is_ok());
        assert!(QueryConfig::default().with_graph_depth(4).validate().is_err());
    }

    #[test]
    fn detailed_style_runs_warmer() {
        assert!(ResponseStyle::Detailed.temperature() > ResponseStyle::Concise.temperature());
        assert_eq!(ResponseStyle::Scientific.temperature(), 0.3);
    }

    #[test]
    fn thinking_model_maps_to_flash_endpoint() {
        assert_eq!(SynthesisModel::GeminiFlashThinking.api_model(), "gemini-2.5-flash");
        assert_eq!(
            SynthesisModel::GeminiFlashThinking.to_string(),
            "gemini-2.5-flash-thinking"
        );
    }
}

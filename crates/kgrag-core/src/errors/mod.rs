mod config_error;
mod embedding_error;
mod graph_error;
mod synthesis_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use graph_error::GraphError;
pub use synthesis_error::SynthesisError;

/// Top-level error for every fallible kgrag operation.
#[derive(Debug, thiserror::Error)]
pub enum KgragError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("query {generation} superseded by query {current}")]
    Superseded { generation: u64, current: u64 },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KgragError {
    /// Whether this error ended a query because a newer one replaced it.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}

pub type KgragResult<T> = Result<T, KgragError>;

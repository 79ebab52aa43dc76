/// Graph document errors. Only raised while loading, never mid-query.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("invalid graph document {source_name}: {reason}")]
    InvalidDocument { source_name: String, reason: String },

    #[error("graph has no nodes")]
    Empty,
}

use async_trait::async_trait;

use crate::errors::KgragResult;

/// Text embedding provider.
#[async_trait]
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    async fn embed(&self, text: &str) -> KgragResult<Vec<f32>>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}

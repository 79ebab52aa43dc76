//! Embedding provider implementations and the factory that picks one from config.

mod gemini;
mod hashing;

pub use gemini::GeminiEmbedder;
pub use hashing::HashingEmbedder;

use std::sync::Arc;
use std::time::Duration;

use kgrag_core::config::{EmbeddingModel, ProviderConfig, ProviderKind};
use kgrag_core::errors::{EmbeddingError, KgragResult};
use kgrag_core::traits::IEmbeddingProvider;

/// Build the embedding provider selected by `config`.
///
/// The Gemini provider needs its API key at construction time, so a missing
/// key is reported here rather than on the first call.
pub fn create_embedder(
    config: &ProviderConfig,
    model: EmbeddingModel,
) -> KgragResult<Arc<dyn IEmbeddingProvider>> {
    match config.kind {
        ProviderKind::Gemini => {
            let api_key = config.api_key()?;
            Ok(Arc::new(GeminiEmbedder::new(
                api_key,
                config.base_url.clone(),
                model,
            )))
        }
        ProviderKind::Hashing => Ok(Arc::new(HashingEmbedder::new(config.hashing_dimensions))),
    }
}

/// Embed `text`, treating a timeout or an empty vector as a provider failure.
pub async fn embed_with_timeout(
    provider: &dyn IEmbeddingProvider,
    text: &str,
    timeout: Duration,
) -> KgragResult<Vec<f32>> {
    let vector = match tokio::time::timeout(timeout, provider.embed(text)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(EmbeddingError::Timeout {
                provider: provider.name().to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }
            .into())
        }
    };

    if vector.is_empty() {
        return Err(EmbeddingError::EmptyVector {
            provider: provider.name().to_string(),
        }
        .into());
    }
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_kind_needs_no_key() {
        let config = ProviderConfig {
            kind: ProviderKind::Hashing,
            hashing_dimensions: 64,
            ..Default::default()
        };
        let provider = create_embedder(&config, EmbeddingModel::default()).unwrap();
        assert_eq!(provider.name(), "hashing");
    }

    #[test]
    fn gemini_kind_without_key_fails() {
        let config = ProviderConfig {
            kind: ProviderKind::Gemini,
            api_key_env: "KGRAG_EMBEDDINGS_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert!(create_embedder(&config, EmbeddingModel::default()).is_err());
    }

    #[tokio::test]
    async fn empty_vector_is_an_error() {
        let provider = HashingEmbedder::new(0);
        let err = embed_with_timeout(&provider, "anything", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no vector"));
    }
}

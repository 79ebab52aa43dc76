//! Gemini REST embedding provider (`models/<model>:embedContent`).

use async_trait::async_trait;
use kgrag_core::config::EmbeddingModel;
use kgrag_core::errors::{EmbeddingError, KgragResult};
use kgrag_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Embedding provider backed by the Gemini `embedContent` endpoint.
pub struct GeminiEmbedder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: EmbeddingModel,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

impl GeminiEmbedder {
    pub fn new(api_key: String, base_url: String, model: EmbeddingModel) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:embedContent", self.base_url, self.model.as_str())
    }

    fn failure(&self, reason: String) -> EmbeddingError {
        EmbeddingError::ProviderFailed {
            provider: self.name().to_string(),
            reason,
        }
    }
}

#[async_trait]
impl IEmbeddingProvider for GeminiEmbedder {
    async fn embed(&self, text: &str) -> KgragResult<Vec<f32>> {
        let body = EmbedRequest {
            model: format!("models/{}", self.model.as_str()),
            content: Content {
                parts: [Part { text }],
            },
        };

        debug!(model = self.model.as_str(), chars = text.len(), "requesting embedding");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.failure(format!("HTTP error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(self.failure(format!("API returned {status}: {body}")).into());
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| self.failure(format!("JSON parse error: {e}")))?;

        match parsed.embedding {
            Some(embedding) if !embedding.values.is_empty() => Ok(embedding.values),
            _ => Err(EmbeddingError::EmptyVector {
                provider: self.name().to_string(),
            }
            .into()),
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_strips_trailing_slash() {
        let p = GeminiEmbedder::new(
            "key".into(),
            "https://example.test/v1beta/".into(),
            EmbeddingModel::TextEmbedding004,
        );
        assert_eq!(
            p.endpoint(),
            "https://example.test/v1beta/models/text-embedding-004:embedContent"
        );
    }

    #[test]
    fn request_body_shape() {
        let body = EmbedRequest {
            model: "models/text-embedding-004".into(),
            content: Content {
                parts: [Part { text: "AI: thinking machines" }],
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["content"]["parts"][0]["text"], "AI: thinking machines");
    }

    #[test]
    fn response_without_embedding_parses() {
        let parsed: EmbedResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.embedding.is_none());
    }
}

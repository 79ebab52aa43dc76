//! Gemini REST synthesis provider (`models/<model>:generateContent`).

use async_trait::async_trait;
use kgrag_core::errors::{KgragResult, SynthesisError};
use kgrag_core::models::{SynthesisRequest, SynthesisResponse};
use kgrag_core::traits::ISynthesisProvider;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Synthesis provider backed by Gemini `generateContent` with a JSON
/// response schema of `{answer, reasoning}`.
pub struct GeminiSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 2],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiSynthesizer {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    fn body(request: &SynthesisRequest) -> GenerateRequest<'_> {
        GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [
                    Part {
                        text: &request.system_instructions,
                    },
                    Part {
                        text: &request.context,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: json!({
                    "type": "OBJECT",
                    "properties": {
                        "answer": { "type": "STRING" },
                        "reasoning": { "type": "STRING" }
                    }
                }),
                temperature: request.style.temperature(),
            },
        }
    }

    fn failure(&self, reason: String) -> SynthesisError {
        SynthesisError::ProviderFailed {
            provider: self.name().to_string(),
            reason,
        }
    }
}

/// Strip a Markdown code fence some models wrap around JSON output.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Parse the model's JSON text into a response.
fn parse_answer(text: &str) -> KgragResult<SynthesisResponse> {
    let cleaned = strip_code_fence(text);
    let source = if cleaned.is_empty() { "{}" } else { cleaned };
    serde_json::from_str(source).map_err(|e| {
        SynthesisError::MalformedResponse {
            reason: e.to_string(),
        }
        .into()
    })
}

#[async_trait]
impl ISynthesisProvider for GeminiSynthesizer {
    async fn generate(&self, request: &SynthesisRequest) -> KgragResult<SynthesisResponse> {
        let model = request.model.api_model();
        debug!(
            model,
            style = %request.style,
            context_chars = request.context.len(),
            "requesting synthesis"
        );

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::body(request))
            .send()
            .await
            .map_err(|e| self.failure(format!("HTTP error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(self.failure(format!("API returned {status}: {body}")).into());
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| self.failure(format!("JSON parse error: {e}")))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        parse_answer(&text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

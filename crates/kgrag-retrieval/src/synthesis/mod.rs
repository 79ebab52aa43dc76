//! Synthesis providers and the instructions shared by all of them.

mod extractive;
mod gemini;

pub use extractive::ExtractiveSynthesizer;
pub use gemini::GeminiSynthesizer;

use std::sync::Arc;
use std::time::Duration;

use kgrag_core::config::{ProviderConfig, ProviderKind, ResponseStyle};
use kgrag_core::errors::{KgragResult, SynthesisError};
use kgrag_core::models::{SynthesisRequest, SynthesisResponse};
use kgrag_core::traits::ISynthesisProvider;

/// Answer given when the context does not support an answer.
pub const NOT_IN_GRAPH: &str = "Based on the current graph, I don't have enough information.";

/// System instructions for a given response style.
pub fn system_instructions(style: ResponseStyle) -> String {
    format!(
        "You are an expert AI assistant answering questions based on a specific Knowledge Graph.\n\
         \n\
         User Configuration:\n\
         - Response Style: {style}\n\
         \n\
         Instructions:\n\
         1. Use ONLY the provided context to answer the query.\n\
         2. Adopt the requested response style.\n\
         3. Explain your reasoning by referencing the retrieved nodes and their relationships.\n\
         4. If the answer is not in the graph, say \"{NOT_IN_GRAPH}\""
    )
}

/// Build the synthesizer matching the configured provider family.
pub fn create_synthesizer(config: &ProviderConfig) -> KgragResult<Arc<dyn ISynthesisProvider>> {
    match config.kind {
        ProviderKind::Gemini => Ok(Arc::new(GeminiSynthesizer::new(
            config.api_key()?,
            config.base_url.clone(),
        ))),
        ProviderKind::Hashing => Ok(Arc::new(ExtractiveSynthesizer)),
    }
}

/// Generate, treating a timeout as a provider failure.
pub async fn generate_with_timeout(
    provider: &dyn ISynthesisProvider,
    request: &SynthesisRequest,
    timeout: Duration,
) -> KgragResult<SynthesisResponse> {
    match tokio::time::timeout(timeout, provider.generate(request)).await {
        Ok(result) => result,
        Err(_) => Err(SynthesisError::Timeout {
            provider: provider.name().to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_name_the_style() {
        let text = system_instructions(ResponseStyle::Scientific);
        assert!(text.contains("- Response Style: Scientific & Technical\n"));
        assert!(text.starts_with("You are an expert AI assistant"));
        assert!(text.ends_with(&format!("\"{NOT_IN_GRAPH}\"")));
    }

    #[test]
    fn hashing_kind_uses_extractive() {
        let config = ProviderConfig {
            kind: ProviderKind::Hashing,
            ..Default::default()
        };
        assert_eq!(create_synthesizer(&config).unwrap().name(), "extractive");
    }
}

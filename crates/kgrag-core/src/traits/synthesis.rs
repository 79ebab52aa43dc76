use async_trait::async_trait;

use crate::errors::KgragResult;
use crate::models::{SynthesisRequest, SynthesisResponse};

/// Answer generation provider.
#[async_trait]
pub trait ISynthesisProvider: Send + Sync {
    /// Generate an answer and its reasoning from linearized graph context.
    async fn generate(&self, request: &SynthesisRequest) -> KgragResult<SynthesisResponse>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}

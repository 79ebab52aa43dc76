/// Synthesis (answer generation) provider errors.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("provider {provider} failed: {reason}")]
    ProviderFailed { provider: String, reason: String },

    #[error("provider {provider} timed out after {timeout_ms}ms")]
    Timeout { provider: String, timeout_ms: u64 },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

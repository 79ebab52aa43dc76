use serde::{Deserialize, Serialize};

use crate::config::{ResponseStyle, SynthesisModel};

/// Input to a synthesis provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub system_instructions: String,
    /// Linearized graph context, including the quoted query.
    pub context: String,
    pub style: ResponseStyle,
    pub model: SynthesisModel,
}

/// Structured answer returned by a synthesis provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResponse {
    pub answer: String,
    #[serde(default)]
    pub reasoning: String,
}

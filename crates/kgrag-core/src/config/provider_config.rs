use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Which provider family backs embedding and synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Gemini REST API for both embedding and synthesis.
    #[default]
    Gemini,
    /// Offline feature-hashing embedder with extractive answers.
    Hashing,
}

/// Provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// REST base URL, without trailing slash.
    pub base_url: String,
    /// Vector size produced by the hashing embedder.
    pub hashing_dimensions: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            base_url: defaults::DEFAULT_GEMINI_BASE_URL.to_string(),
            hashing_dimensions: defaults::DEFAULT_HASHING_DIMENSIONS,
        }
    }
}

impl ProviderConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            }),
        }
    }
}

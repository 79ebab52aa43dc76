pub mod defaults;
mod observability_config;
mod pipeline_config;
mod provider_config;
mod query_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use observability_config::ObservabilityConfig;
pub use pipeline_config::PipelineConfig;
pub use provider_config::{ProviderConfig, ProviderKind};
pub use query_config::{
    EmbeddingModel, QueryConfig, ResponseStyle, RetrievalMethod, SynthesisModel,
};

use crate::errors::{ConfigError, KgragResult};

/// Top-level configuration aggregating all sections.
///
/// Every section falls back to compiled defaults, so an empty document is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KgragConfig {
    pub query: QueryConfig,
    pub pipeline: PipelineConfig,
    pub provider: ProviderConfig,
    pub observability: ObservabilityConfig,
}

impl KgragConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> KgragResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file from disk.
    pub fn load(path: &Path) -> KgragResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.query.validate()
    }
}

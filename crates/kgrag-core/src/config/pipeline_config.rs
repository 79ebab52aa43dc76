use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Query pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Timeout applied to every embedding and synthesis call.
    pub provider_timeout_ms: u64,
    /// Cosmetic pause between published phases. Zero disables pacing.
    pub phase_pause_ms: u64,
    /// Maximum entries kept in the query log.
    pub query_log_capacity: usize,
    /// Maximum cached query embeddings.
    pub query_cache_size: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            provider_timeout_ms: defaults::DEFAULT_PROVIDER_TIMEOUT_MS,
            phase_pause_ms: defaults::DEFAULT_PHASE_PAUSE_MS,
            query_log_capacity: defaults::DEFAULT_QUERY_LOG_CAPACITY,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}

impl PipelineConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    pub fn phase_pause(&self) -> Duration {
        Duration::from_millis(self.phase_pause_ms)
    }
}

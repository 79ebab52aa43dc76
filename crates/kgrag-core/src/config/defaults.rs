// Single source of truth for all default values.

// --- Query ---
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_GRAPH_DEPTH: usize = 1;

// --- Pipeline ---
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_PHASE_PAUSE_MS: u64 = 800;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 1_000;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 256;

// --- Provider ---
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_HASHING_DIMENSIONS: usize = 256;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;

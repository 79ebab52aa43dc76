//! Query history: query text, outcome, latency, and retrieval counts.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use kgrag_core::models::{RetrievalOutcome, RetrievalResult};
use serde::{Deserialize, Serialize};

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub generation: u64,
    pub query: String,
    pub outcome: RetrievalOutcome,
    pub latency: Duration,
    pub seed_count: usize,
    pub traversed_count: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl QueryLogEntry {
    /// Create a new entry with the timestamp set to now.
    pub fn new(
        generation: u64,
        query: impl Into<String>,
        result: &RetrievalResult,
        latency: Duration,
    ) -> Self {
        Self {
            generation,
            query: query.into(),
            outcome: result.outcome,
            latency,
            seed_count: result.seed_node_ids.len(),
            traversed_count: result.traversed_node_ids.len(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Bounded query log. The oldest entries are evicted first.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::with_capacity(1_000)
    }
}

impl QueryLog {
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a query.
    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            generation = entry.generation,
            outcome = entry.outcome.as_str(),
            latency_ms = entry.latency.as_millis() as u64,
            "query logged"
        );

        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&QueryLogEntry> {
        self.entries.back()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Average latency across all logged queries.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Number of logged queries per outcome.
    pub fn outcome_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.outcome.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

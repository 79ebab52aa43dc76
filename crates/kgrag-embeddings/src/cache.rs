//! Query-embedding cache using moka.
//!
//! Keys are blake3 hashes of the embedded text, so repeated questions skip
//! the provider round-trip.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kgrag_core::errors::KgragResult;
use kgrag_core::traits::IEmbeddingProvider;
use moka::sync::Cache;

/// Wraps any provider with an in-memory cache.
///
/// Only non-empty vectors are cached; failures always reach the provider again.
pub struct CachedEmbedder {
    inner: Arc<dyn IEmbeddingProvider>,
    cache: Cache<String, Vec<f32>>,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { inner, cache }
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    /// Cached vector for `text`, if any.
    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        self.cache.get(&Self::key(text))
    }

    /// Number of cached entries. Approximate until pending maintenance runs.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached vector, e.g. after switching embedding models.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl IEmbeddingProvider for CachedEmbedder {
    async fn embed(&self, text: &str) -> KgragResult<Vec<f32>> {
        let key = Self::key(text);
        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!(provider = self.inner.name(), "query embedding cache hit");
            return Ok(hit);
        }

        let vector = self.inner.embed(text).await?;
        if !vector.is_empty() {
            self.cache.insert(key, vector.clone());
        }
        Ok(vector)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IEmbeddingProvider for CountingProvider {
        async fn embed(&self, text: &str) -> KgragResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![text.len() as f32, 1.0])
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedEmbedder::new(inner.clone(), 16);

        let a = cached.embed("what is AI?").await.unwrap();
        let b = cached.embed("what is AI?").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.len(), 1);
        assert_eq!(cached.name(), "counting");
    }

    #[tokio::test]
    async fn distinct_texts_miss() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedEmbedder::new(inner.clone(), 16);
        cached.embed("one").await.unwrap();
        cached.embed("two").await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn clear_forgets_entries() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedEmbedder::new(inner, 16);
        cached.embed("one").await.unwrap();
        cached.clear();
        assert_eq!(cached.get("one"), None);
    }
}

//! Feature-hashing embedding provider.
//!
//! Generates fixed-dimension term-frequency vectors by hashing tokens into
//! buckets. No network access, so it backs offline runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use kgrag_core::errors::KgragResult;
use kgrag_core::traits::IEmbeddingProvider;

/// Deterministic hashing embedder.
///
/// Texts sharing vocabulary land close together under cosine similarity.
/// Not semantically rich, but always available.
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Lowercase alphanumeric terms of at least two characters.
    fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.chars().count() >= 2)
            .map(str::to_lowercase)
    }

    /// Build the L2-normalized vector for `text`. An empty vector when
    /// `dimensions` is zero; an all-zero vector when there are no terms.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        if self.dimensions == 0 {
            return Vec::new();
        }

        let mut tf: HashMap<String, f32> = HashMap::new();
        let mut total = 0.0f32;
        for term in Self::tokenize(text) {
            *tf.entry(term).or_default() += 1.0;
            total += 1.0;
        }

        let mut vec = vec![0.0f32; self.dimensions];
        if total == 0.0 {
            return vec;
        }

        for (term, count) in &tf {
            // Longer terms carry more signal than short function words.
            let weight = 1.0 + (term.len() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl IEmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> KgragResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

//! # kgrag-retrieval
//!
//! The query pipeline: embed the question, pick seed nodes by vector
//! similarity, expand them through the graph, linearize the result, and hand
//! it to a synthesis provider, publishing observable progress throughout.
//!
//! ## Architecture
//!
//! ```text
//! GraphRagEngine
//! ├── similarity (cosine scorer)
//! ├── seeds (top-K selection, stable ties)
//! ├── traversal (multi-source bounded BFS, petgraph)
//! ├── context (deterministic text linearization)
//! ├── synthesis
//! │   ├── GeminiSynthesizer (REST generateContent)
//! │   └── ExtractiveSynthesizer (offline)
//! ├── pipeline (stage machine, validated transitions)
//! ├── insight (reducer + watch channel for observers)
//! └── pacing (cosmetic delays between published phases)
//! ```

pub mod context;
pub mod engine;
pub mod insight;
pub mod pacing;
pub mod pipeline;
pub mod seeds;
pub mod similarity;
pub mod synthesis;
pub mod traversal;

pub use engine::GraphRagEngine;
pub use insight::{InsightEvent, InsightState, LogStep, StepStatus, VisualPhase};
pub use pacing::{NoPacing, Pacer, SleepPacer};
pub use pipeline::PipelineStage;
pub use seeds::{select_seeds, ScoredSeed, SeedSelection};
pub use synthesis::{create_synthesizer, ExtractiveSynthesizer, GeminiSynthesizer};

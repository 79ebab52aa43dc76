//! Observable progress of the current query.
//!
//! [`InsightState`] is a pure reducer over [`InsightEvent`]s. The engine owns
//! the single [`InsightPublisher`]; observers hold `watch` receivers and see
//! each published state between mutations.

use kgrag_core::errors::{KgragError, KgragResult};
use serde::Serialize;
use tokio::sync::watch;

/// Visualization phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualPhase {
    #[default]
    Idle,
    Scanning,
    Seeds,
    Traversing,
    Complete,
}

impl VisualPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Seeds => "seeds",
            Self::Traversing => "traversing",
            Self::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
}

/// One line of the step log, keyed by a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogStep {
    pub id: String,
    pub step_name: String,
    pub detail: String,
    pub status: StepStatus,
}

// --- Step ids ---
pub const STEP_EMBED: &str = "step_embed";
pub const STEP_RETRIEVE: &str = "step_retrieve";
pub const STEP_SYNTH: &str = "step_synth";

/// Events the engine feeds into the reducer, in pipeline order.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightEvent {
    Reset,
    Started,
    SeedsSelected {
        seeds: Vec<String>,
        traversed_count: usize,
    },
    Traversed {
        traversed: Vec<String>,
    },
    SynthesisStarted,
    Finished {
        reasoning: String,
    },
}

/// Snapshot of query progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InsightState {
    /// Query that produced this state.
    pub generation: u64,
    pub phase: VisualPhase,
    pub is_active: bool,
    pub logs: Vec<LogStep>,
    pub reasoning: Option<String>,
    pub seed_node_ids: Vec<String>,
    pub traversed_node_ids: Vec<String>,
    /// Seeds followed by traversed nodes, without duplicates.
    pub retrieved_node_ids: Vec<String>,
}

impl InsightState {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn step(&self, id: &str) -> Option<&LogStep> {
        self.logs.iter().find(|s| s.id == id)
    }

    /// Apply one event.
    pub fn apply(&mut self, event: InsightEvent) {
        match event {
            InsightEvent::Reset => *self = Self::new(self.generation),
            InsightEvent::Started => {
                self.phase = VisualPhase::Scanning;
                self.is_active = true;
                self.upsert_step(
                    STEP_EMBED,
                    "Vector Search",
                    "Embedding Query & Calculating Cosine Similarity...",
                    StepStatus::Active,
                );
            }
            InsightEvent::SeedsSelected {
                seeds,
                traversed_count,
            } => {
                self.set_status(STEP_EMBED, StepStatus::Completed);
                self.upsert_step(
                    STEP_RETRIEVE,
                    "Graph Traversal",
                    &format!("Found {} Seeds, {} Neighbors", seeds.len(), traversed_count),
                    StepStatus::Completed,
                );
                self.phase = VisualPhase::Seeds;
                self.seed_node_ids = seeds;
            }
            InsightEvent::Traversed { traversed } => {
                self.phase = VisualPhase::Traversing;
                let mut retrieved = self.seed_node_ids.clone();
                for id in &traversed {
                    if !retrieved.contains(id) {
                        retrieved.push(id.clone());
                    }
                }
                self.traversed_node_ids = traversed;
                self.retrieved_node_ids = retrieved;
            }
            InsightEvent::SynthesisStarted => {
                self.phase = VisualPhase::Complete;
                self.upsert_step(
                    STEP_SYNTH,
                    "LLM Synthesis",
                    "Generating answer from vectors...",
                    StepStatus::Active,
                );
            }
            InsightEvent::Finished { reasoning } => {
                for step in &mut self.logs {
                    if step.status == StepStatus::Active {
                        step.status = StepStatus::Completed;
                    }
                }
                self.phase = VisualPhase::Complete;
                self.is_active = false;
                self.reasoning = Some(reasoning);
            }
        }
    }

    fn upsert_step(&mut self, id: &str, name: &str, detail: &str, status: StepStatus) {
        match self.logs.iter_mut().find(|s| s.id == id) {
            Some(step) => {
                step.step_name = name.to_string();
                step.detail = detail.to_string();
                step.status = status;
            }
            None => self.logs.push(LogStep {
                id: id.to_string(),
                step_name: name.to_string(),
                detail: detail.to_string(),
                status,
            }),
        }
    }

    fn set_status(&mut self, id: &str, status: StepStatus) {
        if let Some(step) = self.logs.iter_mut().find(|s| s.id == id) {
            step.status = status;
        }
    }
}

/// Single writer for [`InsightState`].
///
/// Publications carry the generation of the query making them; anything from
/// a generation older than the current state is discarded.
pub struct InsightPublisher {
    tx: watch::Sender<InsightState>,
}

impl Default for InsightPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightPublisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(InsightState::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<InsightState> {
        self.tx.subscribe()
    }

    /// Clone of the latest state.
    pub fn snapshot(&self) -> InsightState {
        self.tx.borrow().clone()
    }

    /// Reset to an empty `idle` state owned by `generation`.
    ///
    /// Ignored when a newer generation already owns the state.
    pub fn reset(&self, generation: u64) -> bool {
        self.tx.send_if_modified(|state| {
            if generation < state.generation {
                return false;
            }
            *state = InsightState::new(generation);
            true
        })
    }

    /// Apply `event` on behalf of `generation`.
    pub fn publish(&self, generation: u64, event: InsightEvent) -> KgragResult<()> {
        let mut current = generation;
        let applied = self.tx.send_if_modified(|state| {
            if state.generation != generation {
                current = state.generation;
                return false;
            }
            state.apply(event);
            true
        });

        if applied {
            Ok(())
        } else {
            Err(KgragError::Superseded {
                generation,
                current,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_sequence_reaches_complete() {
        let mut state = InsightState::new(1);
        state.apply(InsightEvent::Started);
        assert_eq!(state.phase, VisualPhase::Scanning);
        assert!(state.is_active);

        state.apply(InsightEvent::SeedsSelected {
            seeds: ids(&["A"]),
            traversed_count: 2,
        });
        assert_eq!(state.phase, VisualPhase::Seeds);
        assert_eq!(state.seed_node_ids, ids(&["A"]));
        assert!(state.traversed_node_ids.is_empty());
        assert_eq!(state.step(STEP_EMBED).unwrap().status, StepStatus::Completed);
        assert_eq!(
            state.step(STEP_RETRIEVE).unwrap().detail,
            "Found 1 Seeds, 2 Neighbors"
        );

        state.apply(InsightEvent::Traversed {
            traversed: ids(&["B", "C"]),
        });
        assert_eq!(state.phase, VisualPhase::Traversing);
        assert_eq!(state.retrieved_node_ids, ids(&["A", "B", "C"]));

        state.apply(InsightEvent::SynthesisStarted);
        assert_eq!(state.phase, VisualPhase::Complete);
        assert_eq!(state.step(STEP_SYNTH).unwrap().status, StepStatus::Active);

        state.apply(InsightEvent::Finished {
            reasoning: "because".into(),
        });
        assert!(!state.is_active);
        assert_eq!(state.reasoning.as_deref(), Some("because"));
        assert!(state.logs.iter().all(|s| s.status == StepStatus::Completed));
        assert_eq!(state.logs.len(), 3);
    }

    #[test]
    fn short_circuit_jumps_to_complete() {
        let mut state = InsightState::new(1);
        state.apply(InsightEvent::Started);
        state.apply(InsightEvent::Finished {
            reasoning: "Missing Node Embeddings.".into(),
        });
        assert_eq!(state.phase, VisualPhase::Complete);
        assert!(state.seed_node_ids.is_empty());
        assert_eq!(state.step(STEP_EMBED).unwrap().status, StepStatus::Completed);
    }

    #[test]
    fn repeated_step_updates_in_place() {
        let mut state = InsightState::new(1);
        state.apply(InsightEvent::Started);
        state.apply(InsightEvent::Started);
        assert_eq!(state.logs.len(), 1);
    }

    #[test]
    fn reset_keeps_generation() {
        let mut state = InsightState::new(4);
        state.apply(InsightEvent::Started);
        state.apply(InsightEvent::Reset);
        assert_eq!(state, InsightState::new(4));
    }

    #[test]
    fn publisher_drops_stale_generation() {
        let publisher = InsightPublisher::new();
        assert!(publisher.reset(1));
        publisher.publish(1, InsightEvent::Started).unwrap();

        assert!(publisher.reset(2));
        let err = publisher.publish(1, InsightEvent::SynthesisStarted).unwrap_err();
        assert!(matches!(
            err,
            KgragError::Superseded {
                generation: 1,
                current: 2
            }
        ));
        assert_eq!(publisher.snapshot(), InsightState::new(2));

        // An older reset cannot take the state back.
        assert!(!publisher.reset(1));
        assert_eq!(publisher.snapshot().generation, 2);
    }

    #[tokio::test]
    async fn subscribers_see_publications() {
        let publisher = InsightPublisher::new();
        let mut rx = publisher.subscribe();
        publisher.reset(1);
        publisher.publish(1, InsightEvent::Started).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().phase, VisualPhase::Scanning);
    }
}

//! Query pipeline stages with validated transitions.

use std::fmt;

use serde::Serialize;

/// Stage of one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    #[default]
    Idle,
    EmbeddingQuery,
    Scoring,
    Traversing,
    BuildingContext,
    Synthesizing,
    Done,
    Error,
}

impl PipelineStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Whether `next` may follow `self`.
    ///
    /// Stages advance one step at a time, except that scoring and embedding
    /// may finish early, and any non-terminal stage may fail.
    pub fn can_advance_to(&self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        if next == Error {
            return !self.is_terminal();
        }
        matches!(
            (*self, next),
            (Idle, EmbeddingQuery)
                | (EmbeddingQuery, Scoring)
                | (EmbeddingQuery, Done)
                | (Scoring, Traversing)
                | (Scoring, Done)
                | (Traversing, BuildingContext)
                | (BuildingContext, Synthesizing)
                | (Synthesizing, Done)
        )
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::EmbeddingQuery => "embedding_query",
            Self::Scoring => "scoring",
            Self::Traversing => "traversing",
            Self::BuildingContext => "building_context",
            Self::Synthesizing => "synthesizing",
            Self::Done => "done",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Tracks the stage of a single query and rejects out-of-order transitions.
#[derive(Debug, Default)]
pub struct StageTracker {
    stage: PipelineStage,
}

impl StageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Move to `next`. Invalid transitions are logged and ignored.
    pub fn advance(&mut self, next: PipelineStage) -> bool {
        if self.stage.can_advance_to(next) {
            tracing::trace!(from = %self.stage, to = %next, "pipeline stage");
            self.stage = next;
            true
        } else {
            tracing::error!(from = %self.stage, to = %next, "invalid pipeline transition");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineStage::*;
    use super::*;

    #[test]
    fn happy_path_is_valid() {
        let path = [
            Idle,
            EmbeddingQuery,
            Scoring,
            Traversing,
            BuildingContext,
            Synthesizing,
            Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn short_circuits_are_valid() {
        assert!(EmbeddingQuery.can_advance_to(Done));
        assert!(Scoring.can_advance_to(Done));
        assert!(!Traversing.can_advance_to(Done));
    }

    #[test]
    fn error_from_any_non_terminal() {
        for stage in [Idle, EmbeddingQuery, Scoring, Traversing, BuildingContext, Synthesizing] {
            assert!(stage.can_advance_to(Error));
        }
        assert!(!Done.can_advance_to(Error));
        assert!(!Error.can_advance_to(Error));
    }

    #[test]
    fn no_skipping_or_going_back() {
        assert!(!Idle.can_advance_to(Scoring));
        assert!(!Synthesizing.can_advance_to(Traversing));
        assert!(!Done.can_advance_to(Idle));
    }

    #[test]
    fn tracker_ignores_invalid_transition() {
        let mut tracker = StageTracker::new();
        assert!(tracker.advance(EmbeddingQuery));
        assert!(!tracker.advance(Synthesizing));
        assert_eq!(tracker.stage(), EmbeddingQuery);
    }
}

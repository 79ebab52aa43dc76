use kgrag_core::errors::*;

#[test]
fn embedding_error_converts_to_kgrag_error() {
    let err: KgragError = EmbeddingError::EmptyVector {
        provider: "gemini".into(),
    }
    .into();
    assert!(matches!(err, KgragError::Embedding(_)));
    assert!(err.to_string().contains("gemini"));
}

#[test]
fn synthesis_timeout_carries_duration() {
    let err: KgragError = SynthesisError::Timeout {
        provider: "gemini".into(),
        timeout_ms: 2_500,
    }
    .into();
    assert!(err.to_string().contains("2500ms"));
}

#[test]
fn superseded_is_flagged() {
    let err = KgragError::Superseded {
        generation: 1,
        current: 2,
    };
    assert!(err.is_superseded());
    assert!(!KgragError::from(GraphError::Empty).is_superseded());
}

#[test]
fn out_of_range_reports_bounds() {
    let err = ConfigError::OutOfRange {
        field: "top_k",
        value: 42,
        min: 1,
        max: 10,
    };
    let msg = err.to_string();
    assert!(msg.contains("top_k"));
    assert!(msg.contains("42"));
    assert!(msg.contains("[1, 10]"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "graph.json");
    let err: KgragError = io.into();
    assert!(matches!(err, KgragError::Io(_)));
}

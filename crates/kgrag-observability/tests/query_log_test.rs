use std::time::Duration;

use kgrag_core::models::{RetrievalOutcome, RetrievalResult};
use kgrag_observability::{QueryLog, QueryLogEntry};

fn answered(seeds: &[&str], traversed: &[&str]) -> RetrievalResult {
    RetrievalResult {
        seed_node_ids: seeds.iter().map(|s| s.to_string()).collect(),
        traversed_node_ids: traversed.iter().map(|s| s.to_string()).collect(),
        answer: "answer".into(),
        reasoning: "reasoning".into(),
        outcome: RetrievalOutcome::Answered,
    }
}

#[test]
fn entry_copies_counts_and_outcome() {
    let result = answered(&["A", "B"], &["C"]);
    let entry = QueryLogEntry::new(7, "what is A?", &result, Duration::from_millis(12));
    assert_eq!(entry.generation, 7);
    assert_eq!(entry.seed_count, 2);
    assert_eq!(entry.traversed_count, 1);
    assert_eq!(entry.outcome, RetrievalOutcome::Answered);
}

#[test]
fn log_evicts_oldest_beyond_capacity() {
    let mut log = QueryLog::with_capacity(2);
    for generation in 1..=3 {
        let result = answered(&["A"], &[]);
        log.record(QueryLogEntry::new(
            generation,
            format!("q{generation}"),
            &result,
            Duration::from_millis(10),
        ));
    }
    assert_eq!(log.count(), 2);
    let generations: Vec<u64> = log.entries().map(|e| e.generation).collect();
    assert_eq!(generations, vec![2, 3]);
    assert_eq!(log.latest().map(|e| e.query.as_str()), Some("q3"));
}

#[test]
fn avg_latency_and_outcome_counts() {
    let mut log = QueryLog::default();
    assert_eq!(log.avg_latency(), Duration::ZERO);

    log.record(QueryLogEntry::new(
        1,
        "a",
        &answered(&["A"], &[]),
        Duration::from_millis(10),
    ));
    log.record(QueryLogEntry::new(
        2,
        "b",
        &RetrievalResult::empty(RetrievalOutcome::EmbeddingFailed, "x", "y"),
        Duration::from_millis(30),
    ));

    assert_eq!(log.avg_latency(), Duration::from_millis(20));
    let counts = log.outcome_counts();
    assert_eq!(counts.get("answered"), Some(&1));
    assert_eq!(counts.get("embedding_failed"), Some(&1));
}

#[test]
fn entry_serializes_to_json() {
    let entry = QueryLogEntry::new(1, "q", &answered(&["A"], &[]), Duration::from_millis(5));
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["outcome"], "answered");
    assert_eq!(json["seed_count"], 1);
}

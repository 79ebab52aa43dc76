//! Offline synthesis: answers straight from the linearized context.
//!
//! Picks the best vector match, quotes its description, and lists the
//! relationships that touch it. No model is involved, so the answer is only
//! as good as the graph text.

use async_trait::async_trait;
use kgrag_core::errors::KgragResult;
use kgrag_core::models::{SynthesisRequest, SynthesisResponse};
use kgrag_core::traits::ISynthesisProvider;

use super::NOT_IN_GRAPH;

const TOP_MATCHES: &str = "Top Matches (Vector Search):";
const NODES: &str = "Relevant Graph Context (Nodes):";
const RELATIONSHIPS: &str = "Relevant Graph Context (Relationships):";

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveSynthesizer;

#[derive(Default)]
struct ParsedContext<'a> {
    matches: Vec<&'a str>,
    nodes: Vec<&'a str>,
    relationships: Vec<&'a str>,
}

fn parse(context: &str) -> ParsedContext<'_> {
    let mut parsed = ParsedContext::default();
    let mut section: Option<&mut Vec<&str>> = None;
    for line in context.lines() {
        let line = line.trim();
        match line {
            TOP_MATCHES => section = Some(&mut parsed.matches),
            NODES => section = Some(&mut parsed.nodes),
            RELATIONSHIPS => section = Some(&mut parsed.relationships),
            _ => {
                if let (Some(items), Some(item)) = (section.as_mut(), line.strip_prefix("- ")) {
                    items.push(item);
                }
            }
        }
    }
    parsed
}

/// `"Label (Similarity: 0.1234)"` → `"Label"`.
fn match_label(line: &str) -> &str {
    line.rsplit_once(" (Similarity:")
        .map_or(line, |(label, _)| label)
}

impl ExtractiveSynthesizer {
    fn answer(context: &str) -> SynthesisResponse {
        let parsed = parse(context);
        let Some(top) = parsed.matches.first().copied() else {
            return SynthesisResponse {
                answer: NOT_IN_GRAPH.to_string(),
                reasoning: "No vector matches were retrieved.".to_string(),
            };
        };
        let label = match_label(top);

        // Node lines read "<id> (<label>)" or "<id> (<label>): <description>".
        let marker = format!("({label})");
        let node_line = parsed.nodes.iter().find(|n| n.contains(&marker)).copied();
        let id = node_line.and_then(|n| n.split_once(" (")).map(|(id, _)| id);
        let description = node_line
            .and_then(|n| n.split_once(&format!("{marker}: ")))
            .map(|(_, d)| d);

        let mut answer = match description {
            Some(d) => format!("{label}: {d}"),
            None => label.to_string(),
        };

        let related: Vec<&str> = match id {
            Some(id) => parsed
                .relationships
                .iter()
                .filter(|r| {
                    r.starts_with(&format!("{id} --[")) || r.ends_with(&format!("]--> {id}"))
                })
                .copied()
                .collect(),
            None => Vec::new(),
        };
        if !related.is_empty() {
            answer.push_str("\nRelated: ");
            answer.push_str(&related.join("; "));
        }

        SynthesisResponse {
            answer,
            reasoning: format!(
                "Top match {top}. Extracted from {} retrieved nodes and {} relationships.",
                parsed.nodes.len(),
                parsed.relationships.len()
            ),
        }
    }
}

#[async_trait]
impl ISynthesisProvider for ExtractiveSynthesizer {
    async fn generate(&self, request: &SynthesisRequest) -> KgragResult<SynthesisResponse> {
        Ok(Self::answer(&request.context))
    }

    fn name(&self) -> &str {
        "extractive"
    }
}

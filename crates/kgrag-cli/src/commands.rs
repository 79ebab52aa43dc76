//! Subcommand implementations.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use kgrag_core::config::KgragConfig;
use kgrag_core::errors::GraphError;
use kgrag_core::graph::{GraphDocument, KnowledgeGraph};
use kgrag_core::models::RetrievalResult;
use kgrag_embeddings::create_embedder;
use kgrag_observability::QueryLog;
use kgrag_retrieval::synthesis::create_synthesizer;
use kgrag_retrieval::{GraphRagEngine, InsightState, NoPacing, VisualPhase};
use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

#[derive(Serialize)]
struct AnswerOutput<'a> {
    question: &'a str,
    #[serde(flatten)]
    result: &'a RetrievalResult,
}

/// `kgrag ask`
pub async fn ask(mut config: KgragConfig, args: &crate::cli::AskArgs, json: bool) -> Result<()> {
    args.apply(&mut config)?;

    let document = GraphDocument::load(&args.graph)
        .with_context(|| format!("loading graph {}", args.graph.display()))?;
    if document.nodes.is_empty() {
        return Err(GraphError::Empty).with_context(|| args.graph.display().to_string());
    }

    let embedder = create_embedder(&config.provider, config.query.embedding_model)?;
    let synthesizer = create_synthesizer(&config.provider)?;
    let mut engine = GraphRagEngine::new(embedder, synthesizer, config.pipeline.clone());
    if config.pipeline.phase_pause_ms == 0 {
        engine = engine.with_pacer(Arc::new(NoPacing));
    }

    let report = engine.load_graph(document).await;
    info!(
        embedded = report.embedded,
        failed = report.failed.len(),
        "graph ready"
    );
    if !report.is_complete() && !json {
        eprintln!(
            "warning: {} node(s) have no embedding: {}",
            report.failed.len(),
            report.failed.join(", ")
        );
    }

    let printer = (!json).then(|| tokio::spawn(print_progress(engine.subscribe())));

    let mut outputs = Vec::new();
    for question in &args.questions {
        let result = engine.query(question, &config.query).await?;
        if json {
            outputs.push(serde_json::to_value(AnswerOutput {
                question,
                result: &result,
            })?);
        } else {
            print_answer(&engine.graph(), question, &result);
        }
    }

    // Closing the insight channel lets the printer drain the final state and exit.
    let log = engine.query_log();
    drop(engine);
    if let Some(printer) = printer {
        printer.await?;
    }

    if json {
        let mut root = serde_json::json!({ "answers": outputs });
        if args.history {
            root["history"] = serde_json::to_value(log.entries().collect::<Vec<_>>())?;
        }
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else if args.history {
        print_history(&log);
    }
    Ok(())
}

/// `kgrag inspect`
pub fn inspect(path: &Path, json: bool) -> Result<()> {
    let document = GraphDocument::load(path)
        .with_context(|| format!("loading graph {}", path.display()))?;
    let graph = KnowledgeGraph::from_document(document);
    let report = graph.load_report();

    if json {
        let value = serde_json::json!({
            "nodes": graph.len(),
            "edges": graph.edges().len(),
            "embedded": graph.embedded_count(),
            "legend": graph.legend(),
            "load_report": report,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{}: {} nodes, {} edges, {} embedded",
        path.display(),
        graph.len(),
        graph.edges().len(),
        graph.embedded_count()
    );
    for node in graph.nodes() {
        let group = graph
            .group_name(node.group)
            .map(str::to_string)
            .unwrap_or_else(|| format!("group {}", node.group));
        println!("  {} ({}) [{}]", node.id, node.label, group);
    }
    for edge in graph.edges() {
        println!("  {} --[{}]--> {}", edge.source, edge.label, edge.target);
    }
    for id in &report.duplicate_nodes {
        println!("  dropped duplicate node {id}");
    }
    for edge in &report.dangling_edges {
        println!(
            "  dropped dangling edge {} --[{}]--> {}",
            edge.source, edge.label, edge.target
        );
    }
    Ok(())
}

/// Echo phase changes and step log updates to stderr until the engine is dropped.
async fn print_progress(mut rx: watch::Receiver<InsightState>) {
    let mut last_phase = VisualPhase::Idle;
    let mut printed: HashSet<(u64, String, String)> = HashSet::new();
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if state.phase != last_phase {
            eprintln!("[{}]", state.phase.as_str());
            last_phase = state.phase;
        }
        for step in &state.logs {
            let key = (state.generation, step.id.clone(), format!("{:?}", step.status));
            if printed.insert(key) {
                eprintln!("  {} - {} ({:?})", step.step_name, step.detail, step.status);
            }
        }
    }
}

fn print_answer(graph: &KnowledgeGraph, question: &str, result: &RetrievalResult) {
    let describe = |ids: &[String]| -> String {
        ids.iter()
            .map(|id| match graph.node(id) {
                Some(node) => format!("{} ({})", node.label, id),
                None => id.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("Q: {question}");
    println!("\n{}\n", result.answer);
    println!("Reasoning: {}", result.reasoning);
    println!("Seeds: {}", describe(&result.seed_node_ids));
    println!("Traversed: {}", describe(&result.traversed_node_ids));
    println!("Outcome: {}\n", result.outcome.as_str());
}

fn print_history(log: &QueryLog) {
    println!(
        "{} queries, average latency {:?}",
        log.count(),
        log.avg_latency()
    );
    for (outcome, count) in log.outcome_counts() {
        println!("  {outcome}: {count}");
    }
    for entry in log.entries() {
        println!(
            "  #{} {} {} seeds, {} traversed, {:?} \"{}\"",
            entry.generation,
            entry.outcome.as_str(),
            entry.seed_count,
            entry.traversed_count,
            entry.latency,
            entry.query
        );
    }
}

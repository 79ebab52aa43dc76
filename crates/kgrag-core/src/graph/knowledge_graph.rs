use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{Edge, GraphDocument, Node};

/// What was discarded while building a [`KnowledgeGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Nodes dropped because an earlier node already used the id.
    pub duplicate_nodes: Vec<String>,
    /// Edges dropped because an endpoint is not a known node.
    pub dangling_edges: Vec<Edge>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_nodes.is_empty() && self.dangling_edges.is_empty()
    }
}

/// A validated, ordered knowledge graph.
///
/// Node order is insertion order and is the tie-break and rendering order.
/// Every edge's endpoints exist in the node set; anything else was dropped
/// when the graph was built and recorded in [`KnowledgeGraph::load_report`].
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    legend: BTreeMap<u32, String>,
    /// Map from node id → position in `nodes`.
    index: HashMap<String, usize>,
    report: LoadReport,
}

impl KnowledgeGraph {
    /// Build a graph from a document, dropping duplicate nodes and dangling edges.
    pub fn from_document(document: GraphDocument) -> Self {
        let GraphDocument {
            nodes: raw_nodes,
            links,
            legend,
        } = document;

        let mut report = LoadReport::default();
        let mut index = HashMap::with_capacity(raw_nodes.len());
        let mut nodes = Vec::with_capacity(raw_nodes.len());

        for node in raw_nodes {
            if index.contains_key(&node.id) {
                report.duplicate_nodes.push(node.id);
                continue;
            }
            index.insert(node.id.clone(), nodes.len());
            nodes.push(node);
        }

        let (edges, dangling): (Vec<Edge>, Vec<Edge>) = links
            .into_iter()
            .partition(|e| index.contains_key(&e.source) && index.contains_key(&e.target));
        report.dangling_edges = dangling;

        Self {
            nodes,
            edges,
            legend,
            index,
            report,
        }
    }

    /// Convenience constructor for in-code graphs.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self::from_document(GraphDocument::new(nodes, edges))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn legend(&self) -> &BTreeMap<u32, String> {
        &self.legend
    }

    /// Display name of a node group, if the legend has one.
    pub fn group_name(&self, group: u32) -> Option<&str> {
        self.legend.get(&group).map(String::as_str)
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of a node in graph order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.position(id).map(|i| &self.nodes[i])
    }

    /// Number of nodes currently carrying a usable embedding.
    pub fn embedded_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.has_embedding()).count()
    }

    /// Attach (or replace) the embedding of the node at `position`.
    ///
    /// Returns `false` if the position is out of range.
    pub fn set_embedding(&mut self, position: usize, embedding: Vec<f32>) -> bool {
        match self.nodes.get_mut(position) {
            Some(node) => {
                node.embedding = Some(embedding);
                true
            }
            None => false,
        }
    }

    /// Drop the embedding of the node at `position`, if any.
    ///
    /// Returns `false` if the position is out of range.
    pub fn clear_embedding(&mut self, position: usize) -> bool {
        match self.nodes.get_mut(position) {
            Some(node) => {
                node.embedding = None;
                true
            }
            None => false,
        }
    }

    /// Convert back to the serialized form, embeddings included.
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes.clone(),
            links: self.edges.clone(),
            legend: self.legend.clone(),
        }
    }
}

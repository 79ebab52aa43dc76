use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Edge, Node};
use crate::errors::{GraphError, KgragResult};

/// Serialized graph as produced by authoring tools and dataset files.
///
/// Edges are stored under `links`. Unknown fields (visual weights and the
/// like) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Edge>,
    /// Display name per node group.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub legend: BTreeMap<u32, String>,
}

impl GraphDocument {
    pub fn new(nodes: Vec<Node>, links: Vec<Edge>) -> Self {
        Self {
            nodes,
            links,
            legend: BTreeMap::new(),
        }
    }

    pub fn with_legend(mut self, legend: BTreeMap<u32, String>) -> Self {
        self.legend = legend;
        self
    }

    /// Parse a JSON document. `source_name` only labels errors.
    pub fn from_json(source_name: &str, json: &str) -> KgragResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            GraphError::InvalidDocument {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Read and parse a JSON document from disk.
    pub fn load(path: &Path) -> KgragResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&path.display().to_string(), &json)
    }
}

//! Node-link JSON schema.
//!
//! ```json
//! {
//!   "directed": false,
//!   "multigraph": false,
//!   "graph": {},
//!   "nodes": [{"id": "3f2a9c1d", "path": "...", "terms": ["..."]}],
//!   "edges": [{"source": "3f2a9c1d", "target": "8be0417a", "weight": 2}]
//! }
//! ```
//!
//! `links` is accepted as an alias of `edges` when reading.

use growth_types::{DocumentNode, Edge};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GraphError, GraphResult};
use crate::store::GraphStore;

/// Serialized form of a whole graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkGraph {
    #[serde(default)]
    pub directed: bool,

    #[serde(default)]
    pub multigraph: bool,

    /// Graph-level attributes, preserved verbatim
    #[serde(default)]
    pub graph: serde_json::Map<String, serde_json::Value>,

    #[serde(default)]
    pub nodes: Vec<DocumentNode>,

    #[serde(default, alias = "links")]
    pub edges: Vec<Edge>,
}

impl NodeLinkGraph {
    /// Snapshot a store, carrying the given graph-level attributes.
    pub fn from_store(
        store: &dyn GraphStore,
        graph: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            directed: false,
            multigraph: false,
            graph,
            nodes: store.nodes().cloned().collect(),
            edges: store.edges().cloned().collect(),
        }
    }

    /// Populate `store` with this document's nodes and edges.
    ///
    /// Edges must reference nodes present in the document. Self-loops are
    /// skipped with a warning.
    pub fn populate(self, store: &mut dyn GraphStore) -> GraphResult<()> {
        if self.directed {
            warn!("Graph file is marked directed, loading edges as undirected");
        }
        if self.multigraph {
            warn!("Graph file is marked multigraph, parallel edges will collapse");
        }

        for node in self.nodes {
            store.add_node(node);
        }
        for edge in self.edges {
            if edge.source == edge.target {
                warn!(node = %edge.source, "Skipping self-loop edge in graph file");
                continue;
            }
            let (source, target) = (edge.source.clone(), edge.target.clone());
            store.insert_edge(edge).map_err(|e| match e {
                GraphError::NotFound(id) => GraphError::InvalidInput(format!(
                    "edge {source}-{target} references unknown node {id}"
                )),
                other => other,
            })?;
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

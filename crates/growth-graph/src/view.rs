//! Render-ready projection of the graph.

use growth_types::DocumentNode;
use serde::{Deserialize, Serialize};

use crate::store::GraphStore;

/// Number of terms shown in an unshaped node's label.
const LABEL_TERMS: usize = 5;

/// A node as shown by a graph renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewNode {
    pub id: String,
    pub label: String,
    /// Hover text
    pub title: String,
}

impl ViewNode {
    pub fn from_node(node: &DocumentNode) -> Self {
        let label = if node.shaped {
            if node.sentence.is_empty() {
                node.id.clone()
            } else {
                node.sentence.clone()
            }
        } else {
            let head: Vec<&str> = node
                .signature()
                .iter()
                .take(LABEL_TERMS)
                .map(String::as_str)
                .collect();
            format!("{}\n{}", node.id, head.join(","))
        };

        let title = if node.shaped && !node.paragraph.is_empty() {
            format!("{}\n\n{}", node.path, node.paragraph)
        } else {
            node.path.clone()
        };

        Self {
            id: node.id.clone(),
            label,
            title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEdge {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

/// Nodes and edges ready for an external renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
}

impl GraphView {
    pub fn from_store(store: &dyn GraphStore) -> Self {
        Self {
            nodes: store.nodes().map(ViewNode::from_node).collect(),
            edges: store
                .edges()
                .map(|e| ViewEdge {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    weight: e.weight,
                })
                .collect(),
        }
    }
}

//! Dependency-free edge-map graph store.

use std::collections::HashMap;

use growth_types::{DocumentNode, Edge, EdgeKey, NodeId};

use super::{check_endpoints, GraphStore};
use crate::error::GraphResult;

/// Edge-map graph.
///
/// Nodes and edges live in insertion-ordered vectors; `edge_slots` maps the
/// unordered endpoint pair of each edge to its slot.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    nodes: Vec<DocumentNode>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    edge_slots: HashMap<EdgeKey, usize>,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn edge_slot(&self, a: &str, b: &str) -> Option<usize> {
        self.edge_slots.get(&EdgeKey::new(a, b)).copied()
    }
}

impl GraphStore for AdjacencyGraph {
    fn add_node(&mut self, node: DocumentNode) {
        if let Some(&slot) = self.index.get(&node.id) {
            self.nodes[slot].merge(node);
            return;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    fn node(&self, id: &str) -> Option<&DocumentNode> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut DocumentNode> {
        let slot = *self.index.get(id)?;
        self.nodes.get_mut(slot)
    }

    fn insert_edge(&mut self, edge: Edge) -> GraphResult<()> {
        check_endpoints(self, &edge)?;

        let key = edge.key();
        if let Some(&slot) = self.edge_slots.get(&key) {
            self.edges[slot] = edge;
            return Ok(());
        }

        self.edge_slots.insert(key, self.edges.len());
        self.edges.push(edge);
        Ok(())
    }

    fn edge(&self, a: &str, b: &str) -> Option<&Edge> {
        self.edge_slot(a, b).map(|slot| &self.edges[slot])
    }

    fn edge_mut(&mut self, a: &str, b: &str) -> Option<&mut Edge> {
        let slot = self.edge_slot(a, b)?;
        self.edges.get_mut(slot)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &DocumentNode> + '_> {
        Box::new(self.nodes.iter())
    }

    fn edges(&self) -> Box<dyn Iterator<Item = &Edge> + '_> {
        Box::new(self.edges.iter())
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn name(&self) -> &'static str {
        "adjacency"
    }
}

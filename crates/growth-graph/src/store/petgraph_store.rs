//! Graph store backed by `petgraph`.
//!
//! Uses an undirected `petgraph::Graph` for structure and a `HashMap` for
//! id lookups. Nodes are never removed, so indices stay stable.

use std::collections::HashMap;

use growth_types::{DocumentNode, Edge, NodeId};
use petgraph::graph::{NodeIndex, UnGraph};

use super::{check_endpoints, GraphStore};
use crate::error::GraphResult;

/// petgraph-backed undirected document graph.
#[derive(Debug, Clone, Default)]
pub struct PetGraphStore {
    graph: UnGraph<DocumentNode, Edge>,
    /// NodeId -> NodeIndex mapping for O(1) node lookups.
    node_index: HashMap<NodeId, NodeIndex>,
}

impl PetGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn index_pair(&self, a: &str, b: &str) -> Option<(NodeIndex, NodeIndex)> {
        Some((*self.node_index.get(a)?, *self.node_index.get(b)?))
    }
}

impl GraphStore for PetGraphStore {
    fn add_node(&mut self, node: DocumentNode) {
        if let Some(&idx) = self.node_index.get(&node.id) {
            if let Some(existing) = self.graph.node_weight_mut(idx) {
                existing.merge(node);
            }
            return;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
    }

    fn node(&self, id: &str) -> Option<&DocumentNode> {
        let idx = *self.node_index.get(id)?;
        self.graph.node_weight(idx)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut DocumentNode> {
        let idx = *self.node_index.get(id)?;
        self.graph.node_weight_mut(idx)
    }

    fn insert_edge(&mut self, edge: Edge) -> GraphResult<()> {
        check_endpoints(self, &edge)?;
        let Some((a, b)) = self.index_pair(&edge.source, &edge.target) else {
            return Ok(());
        };
        // update_edge replaces the weight of an existing a-b edge in place
        self.graph.update_edge(a, b, edge);
        Ok(())
    }

    fn edge(&self, a: &str, b: &str) -> Option<&Edge> {
        let (a, b) = self.index_pair(a, b)?;
        let e = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(e)
    }

    fn edge_mut(&mut self, a: &str, b: &str) -> Option<&mut Edge> {
        let (a, b) = self.index_pair(a, b)?;
        let e = self.graph.find_edge(a, b)?;
        self.graph.edge_weight_mut(e)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &DocumentNode> + '_> {
        Box::new(self.graph.node_weights())
    }

    fn edges(&self) -> Box<dyn Iterator<Item = &Edge> + '_> {
        Box::new(self.graph.edge_weights())
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn name(&self) -> &'static str {
        "petgraph"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_undirected_neighbors() {
        let mut store = PetGraphStore::new();
        for id in ["a", "b", "c"] {
            store.add_node(DocumentNode::new(id, "", Vec::new()));
        }
        store.add_edge("a", "b", 1).unwrap();
        store.add_edge("a", "c", 2).unwrap();

        let idx = store.node_index["a"];
        assert_eq!(store.graph.neighbors(idx).count(), 2);
    }

    #[test]
    fn test_update_edge_keeps_single_edge() {
        let mut store = PetGraphStore::new();
        store.add_node(DocumentNode::new("a", "", Vec::new()));
        store.add_node(DocumentNode::new("b", "", Vec::new()));
        store.insert_edge(Edge::new("a", "b", 1)).unwrap();
        store.insert_edge(Edge::new("b", "a", 3)).unwrap();

        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.edge_weight("a", "b"), Some(3));
    }
}

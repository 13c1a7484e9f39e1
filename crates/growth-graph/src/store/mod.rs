//! Graph storage behind a small capability set.
//!
//! [`GraphStore`] exposes exactly what the engine needs. Two implementations:
//! - [`PetGraphStore`]: `petgraph` undirected graph (feature `petgraph`)
//! - [`AdjacencyGraph`]: dependency-free adjacency map
//!
//! Both keep nodes and edges in insertion order, so serializing either one
//! yields the same node-link document.

mod adjacency;
#[cfg(feature = "petgraph")]
mod petgraph_store;

pub use adjacency::AdjacencyGraph;
#[cfg(feature = "petgraph")]
pub use petgraph_store::PetGraphStore;

use growth_types::{DocumentNode, Edge, StoreBackend};

use crate::error::{GraphError, GraphResult};

/// Undirected document graph.
pub trait GraphStore: Send {
    /// Insert a node, or merge its attributes into an existing node with the
    /// same id.
    fn add_node(&mut self, node: DocumentNode);

    /// Look up a node by id.
    fn node(&self, id: &str) -> Option<&DocumentNode>;

    /// Look up a node by id for mutation.
    fn node_mut(&mut self, id: &str) -> Option<&mut DocumentNode>;

    /// Insert or replace the edge for the unordered pair of `edge`'s
    /// endpoints, keeping the given orientation and attributes.
    ///
    /// Fails with `NotFound` if an endpoint is missing and `InvalidInput` for
    /// self-loops.
    fn insert_edge(&mut self, edge: Edge) -> GraphResult<()>;

    /// Look up the edge between `a` and `b` in either orientation.
    fn edge(&self, a: &str, b: &str) -> Option<&Edge>;

    /// Look up the edge between `a` and `b` for mutation.
    fn edge_mut(&mut self, a: &str, b: &str) -> Option<&mut Edge>;

    /// Iterate nodes in insertion order.
    fn nodes(&self) -> Box<dyn Iterator<Item = &DocumentNode> + '_>;

    /// Iterate edges in insertion order.
    fn edges(&self) -> Box<dyn Iterator<Item = &Edge> + '_>;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Short implementation name for logs and stats.
    fn name(&self) -> &'static str;

    /// Whether a node with `id` exists.
    fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Whether `a` and `b` are connected.
    fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edge(a, b).is_some()
    }

    /// Weight of the edge between `a` and `b`, if any.
    fn edge_weight(&self, a: &str, b: &str) -> Option<u32> {
        self.edge(a, b).map(|e| e.weight)
    }

    /// Insert the edge `{a, b}` or overwrite its weight.
    fn add_edge(&mut self, a: &str, b: &str, weight: u32) -> GraphResult<()> {
        if let Some(edge) = self.edge_mut(a, b) {
            edge.weight = weight;
            return Ok(());
        }
        self.insert_edge(Edge::new(a, b, weight))
    }
}

/// Shared endpoint validation for `insert_edge` implementations.
pub(crate) fn check_endpoints(store: &dyn GraphStore, edge: &Edge) -> GraphResult<()> {
    if edge.source == edge.target {
        return Err(GraphError::InvalidInput(format!(
            "self-loop on node {}",
            edge.source
        )));
    }
    for id in [&edge.source, &edge.target] {
        if !store.contains_node(id) {
            return Err(GraphError::NotFound(id.clone()));
        }
    }
    Ok(())
}

/// Create an empty store for `backend`.
///
/// Falls back to the adjacency map when the petgraph store is requested but
/// the `petgraph` feature is disabled.
pub fn new_store(backend: StoreBackend) -> Box<dyn GraphStore> {
    match backend {
        StoreBackend::Petgraph => petgraph_or_fallback(),
        StoreBackend::Adjacency => Box::new(AdjacencyGraph::new()),
    }
}

#[cfg(feature = "petgraph")]
fn petgraph_or_fallback() -> Box<dyn GraphStore> {
    Box::new(PetGraphStore::new())
}

#[cfg(not(feature = "petgraph"))]
fn petgraph_or_fallback() -> Box<dyn GraphStore> {
    tracing::warn!("petgraph feature disabled, using built-in adjacency store");
    Box::new(AdjacencyGraph::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, terms: &[&str]) -> DocumentNode {
        DocumentNode::new(id, format!("{id}.md"), terms.iter().map(|t| t.to_string()).collect())
    }

    /// Behavior every store must share.
    fn exercise(mut store: Box<dyn GraphStore>) {
        assert_eq!(store.node_count(), 0);
        assert!(store.node("a").is_none());

        store.add_node(node("a", &["alpha"]));
        store.add_node(node("b", &["beta"]));
        store.add_node(node("c", &["gamma"]));
        assert_eq!(store.node_count(), 3);

        // Re-insert merges instead of duplicating
        store.add_node(node("a", &["alpha", "delta"]));
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.node("a").unwrap().terms.len(), 2);

        store.add_edge("a", "b", 2).unwrap();
        assert!(store.has_edge("a", "b"));
        assert!(store.has_edge("b", "a"));
        assert!(!store.has_edge("a", "c"));

        // Overwrite keeps a single edge
        store.add_edge("b", "a", 5).unwrap();
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.edge_weight("a", "b"), Some(5));
        let edge = store.edges().next().unwrap();
        assert_eq!((edge.source.as_str(), edge.target.as_str()), ("a", "b"));

        store.add_edge("c", "a", 1).unwrap();
        let keys: Vec<(String, String)> = store
            .edges()
            .map(|e| (e.source.clone(), e.target.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a".to_string(), "b".to_string()),
                ("c".to_string(), "a".to_string())
            ]
        );

        let ids: Vec<&str> = store.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        store.node_mut("b").unwrap().shape("Beta", "");
        assert!(store.node("b").unwrap().shaped);

        assert!(matches!(
            store.add_edge("a", "missing", 1),
            Err(GraphError::NotFound(id)) if id == "missing"
        ));
        assert!(matches!(
            store.add_edge("a", "a", 1),
            Err(GraphError::InvalidInput(_))
        ));
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn test_adjacency_store_contract() {
        exercise(new_store(StoreBackend::Adjacency));
    }

    #[cfg(feature = "petgraph")]
    #[test]
    fn test_petgraph_store_contract() {
        let store = new_store(StoreBackend::Petgraph);
        assert_eq!(store.name(), "petgraph");
        exercise(store);
    }
}

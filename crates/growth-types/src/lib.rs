//! # growth-types
//!
//! Shared domain types for the growth graph.
//!
//! This crate defines the data structures used throughout the system:
//! - Document nodes: one per ingested document, addressed by content hash
//! - Edges: undirected term-overlap links between nodes
//! - Settings: layered configuration for the engine and the CLI
//!
//! ## Usage
//!
//! ```rust
//! use growth_types::{content_id, DocumentNode};
//!
//! let id = content_id("alpha beta gamma");
//! let node = DocumentNode::new(id, "notes/a.md", vec!["alpha".to_string()]);
//! assert_eq!(node.id.len(), 8);
//! ```

pub mod config;
pub mod edge;
pub mod error;
pub mod node;

pub use config::{
    Backend, ClusteringConfig, ExtractionConfig, GraphConfig, LinkingConfig, Settings,
    StoreBackend, StoreConfig, WeightingConfig,
};
pub use edge::{Edge, EdgeKey};
pub use error::GrowthError;
pub use node::{content_digest, content_id, id_from_digest, DocumentNode, NodeId, NODE_ID_LEN};

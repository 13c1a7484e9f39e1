//! # growth-graph
//!
//! A persistent, incrementally grown graph of documents.
//!
//! Each ingested document becomes a node identified by a hash of its text and
//! described by its top TF-IDF terms. Documents sharing terms are connected by
//! undirected edges weighted by the number of shared terms. The graph lives in
//! a node-link JSON file and is rewritten after every change.
//!
//! ## Pipeline
//!
//! 1. [`TermExtractor`]: text to lowercase alphabetic tokens
//! 2. [`TermWeighter`]: tokens to ranked terms against the corpus
//! 3. [`SimilarityLinker`]: term overlap to weighted edges
//! 4. [`GraphFile`]: node-link JSON persistence
//!
//! [`ClusterEngine`] groups nodes into topics on demand and [`GraphView`]
//! projects the graph for an external renderer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use growth_graph::GrowthGraph;
//! use growth_types::GraphConfig;
//!
//! let mut graph = GrowthGraph::open("graph.json", GraphConfig::default())?;
//! graph.submit_document("notes/willow.md")?;
//! for cluster in graph.cluster_terms(5) {
//!     println!("{}", cluster.join(", "));
//! }
//! # Ok::<(), growth_graph::GraphError>(())
//! ```

pub mod cluster;
pub mod engine;
pub mod error;
pub mod linker;
pub mod node_link;
pub mod persistence;
pub mod similarity;
pub mod store;
pub mod tfidf;
pub mod tokenize;
pub mod view;
pub mod weighting;

pub use cluster::{clusterer_for, ClusterEngine, FrequencyClusterer, KMeansClusterer};
pub use engine::{GraphStats, GrowthGraph, IngestOutcome};
pub use error::{GraphError, GraphResult};
pub use linker::SimilarityLinker;
pub use node_link::NodeLinkGraph;
pub use persistence::GraphFile;
pub use store::{new_store, AdjacencyGraph, GraphStore};
#[cfg(feature = "petgraph")]
pub use store::PetGraphStore;
pub use tfidf::{IdfMode, TfIdf};
pub use tokenize::{extractor_for, RegexTokenizer, TermExtractor, UnicodeTokenizer};
pub use view::{GraphView, ViewEdge, ViewNode};
pub use weighting::{weighter_for, FrequencyWeighter, TermWeighter, TfIdfWeighter};

//! The growth graph engine.
//!
//! [`GrowthGraph`] owns one graph store and the component implementations
//! selected from [`GraphConfig`]. Every mutating entrypoint persists the
//! whole graph before returning.

use std::fs;
use std::path::{Path, PathBuf};

use growth_types::{content_digest, id_from_digest, DocumentNode, GraphConfig, NodeId};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::cluster::{clusterer_for, ClusterEngine};
use crate::error::{GraphError, GraphResult};
use crate::linker::{check_threshold, SimilarityLinker};
use crate::node_link::NodeLinkGraph;
use crate::persistence::GraphFile;
use crate::store::{new_store, GraphStore};
use crate::tokenize::{extractor_for, TermExtractor};
use crate::view::GraphView;
use crate::weighting::{weighter_for, TermWeighter};

/// Result of submitting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// A new node was created
    Added {
        id: NodeId,
        terms: usize,
        edges: usize,
    },
    /// The content was already present; its edges were recomputed
    Refreshed { id: NodeId, edges: usize },
    /// No terms could be extracted
    Skipped,
}

impl IngestOutcome {
    /// Id of the affected node, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Added { id, .. } | Self::Refreshed { id, .. } => Some(id),
            Self::Skipped => None,
        }
    }
}

/// Graph summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub path: PathBuf,
    pub nodes: usize,
    pub edges: usize,
    pub shaped: usize,
    pub store: &'static str,
    pub extractor: &'static str,
    pub weighter: &'static str,
    pub clusterer: &'static str,
}

/// A persistent, growing document graph.
pub struct GrowthGraph {
    file: GraphFile,
    store: Box<dyn GraphStore>,
    /// Graph-level attributes carried through load and save
    graph_attrs: serde_json::Map<String, serde_json::Value>,
    extractor: Box<dyn TermExtractor>,
    weighter: Box<dyn TermWeighter>,
    clusterer: Box<dyn ClusterEngine>,
    linker: SimilarityLinker,
    config: GraphConfig,
}

impl GrowthGraph {
    /// Open the graph stored at `path`, starting empty if the file is absent.
    #[instrument(skip(path, config), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, config: GraphConfig) -> GraphResult<Self> {
        config.validate().map_err(GraphError::InvalidConfig)?;

        let file = GraphFile::new(path.as_ref());
        let mut store = new_store(config.store.backend);
        let mut graph_attrs = serde_json::Map::new();

        if let Some(mut doc) = file.load()? {
            graph_attrs = std::mem::take(&mut doc.graph);
            doc.populate(&mut *store)?;
        }

        let graph = Self {
            file,
            store,
            graph_attrs,
            extractor: extractor_for(&config.extraction)?,
            weighter: weighter_for(&config.weighting),
            clusterer: clusterer_for(&config.clustering),
            linker: SimilarityLinker::new(),
            config,
        };

        info!(
            nodes = graph.store.node_count(),
            edges = graph.store.edge_count(),
            store = graph.store.name(),
            "Opened graph"
        );
        Ok(graph)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }

    pub fn node(&self, id: &str) -> Option<&DocumentNode> {
        self.store.node(id)
    }

    /// Write the full graph to its file.
    pub fn save(&self) -> GraphResult<()> {
        let doc = NodeLinkGraph::from_store(self.store.as_ref(), self.graph_attrs.clone());
        self.file.save(&doc)
    }

    /// Read a UTF-8 document from disk and ingest it.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn submit_document(&mut self, path: impl AsRef<Path>) -> GraphResult<IngestOutcome> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| GraphError::io(path, e))?;
        self.submit_text(&text, &path.to_string_lossy())
    }

    /// Ingest documents in order, stopping at the first error.
    pub fn submit_documents<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
    ) -> GraphResult<Vec<IngestOutcome>> {
        paths.iter().map(|p| self.submit_document(p)).collect()
    }

    /// Ingest raw text recorded under `path`.
    ///
    /// Byte-identical text maps to the existing node, whose edges are
    /// recomputed instead of adding a duplicate.
    #[instrument(skip(self, text))]
    pub fn submit_text(&mut self, text: &str, path: &str) -> GraphResult<IngestOutcome> {
        let digest = content_digest(text);
        let id = id_from_digest(&digest);

        if let Some(existing) = self.store.node(&id) {
            if existing.collides_with(&digest) {
                return Err(GraphError::Collision {
                    id,
                    path: existing.path.clone(),
                });
            }
            return self.refresh(id, digest);
        }

        let tokens = self.extractor.tokenize(text);
        if tokens.is_empty() {
            warn!(path, "No terms extracted, skipping document");
            return Ok(IngestOutcome::Skipped);
        }

        let mut corpus: Vec<Vec<String>> = self
            .store
            .nodes()
            .map(|n| n.signature().to_vec())
            .collect();
        corpus.push(tokens.clone());

        let terms: Vec<String> = self
            .weighter
            .weigh(&corpus, &tokens)
            .into_iter()
            .map(|(term, _)| term)
            .collect();
        if terms.is_empty() {
            warn!(path, "No weighted terms, skipping document");
            return Ok(IngestOutcome::Skipped);
        }
        let term_count = terms.len();

        self.store
            .add_node(DocumentNode::new(id.clone(), path, terms).with_digest(digest));
        let edges = self.linker.link(&mut *self.store, &id)?;
        self.save()?;

        info!(node = %id, terms = term_count, edges, "Added document");
        Ok(IngestOutcome::Added {
            id,
            terms: term_count,
            edges,
        })
    }

    fn refresh(&mut self, id: NodeId, digest: String) -> GraphResult<IngestOutcome> {
        if let Some(node) = self.store.node_mut(&id) {
            // Nodes loaded from older files have no digest yet
            node.digest.get_or_insert(digest);
        }
        let edges = self.linker.link(&mut *self.store, &id)?;
        self.save()?;

        info!(node = %id, edges, "Document already present, refreshed edges");
        Ok(IngestOutcome::Refreshed { id, edges })
    }

    /// Attach curation text to a node.
    ///
    /// Returns `false` without mutating anything if the node is unknown.
    #[instrument(skip(self, sentence, paragraph))]
    pub fn shape_node(&mut self, id: &str, sentence: &str, paragraph: &str) -> GraphResult<bool> {
        let Some(node) = self.store.node_mut(id) else {
            warn!(node = id, "Node not found, nothing to shape");
            return Ok(false);
        };
        node.shape(sentence, paragraph);
        self.save()?;

        info!(node = id, "Shaped node");
        Ok(true)
    }

    /// Add edges from `id` to unconnected nodes with overlap similarity of at
    /// least `threshold`.
    ///
    /// Returns `None` if the node is unknown, else the number of edges added.
    #[instrument(skip(self))]
    pub fn expand_node(&mut self, id: &str, threshold: f64) -> GraphResult<Option<usize>> {
        check_threshold(threshold)?;
        if !self.store.contains_node(id) {
            warn!(node = id, "Node not found, nothing to expand");
            return Ok(None);
        }

        let added = self.linker.expand(&mut *self.store, id, threshold)?;
        self.save()?;

        info!(node = id, added, "Expanded node");
        Ok(Some(added))
    }

    /// Topic clusters over all nodes, each as its top terms.
    #[instrument(skip(self))]
    pub fn cluster_terms(&self, max_clusters: usize) -> Vec<Vec<String>> {
        let nodes: Vec<&DocumentNode> = self.store.nodes().collect();
        let clusters = self.clusterer.cluster(&nodes, max_clusters);
        debug!(clusters = clusters.len(), "Computed clusters");
        clusters
    }

    pub fn view(&self) -> GraphView {
        GraphView::from_store(self.store.as_ref())
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            path: self.file.path().to_path_buf(),
            nodes: self.store.node_count(),
            edges: self.store.edge_count(),
            shaped: self.store.nodes().filter(|n| n.shaped).count(),
            store: self.store.name(),
            extractor: self.extractor.name(),
            weighter: self.weighter.name(),
            clusterer: self.clusterer.name(),
        }
    }
}

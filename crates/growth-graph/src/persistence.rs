//! Graph file persistence.
//!
//! The whole graph is read into memory and rewritten in full on every save.
//! There is no locking: concurrent writers against one file may race.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::{GraphError, GraphResult};
use crate::node_link::NodeLinkGraph;

/// A node-link JSON file on disk.
#[derive(Debug, Clone)]
pub struct GraphFile {
    path: PathBuf,
}

impl GraphFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the graph document, or `None` if the file does not exist yet.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> GraphResult<Option<NodeLinkGraph>> {
        if !self.exists() {
            debug!("Graph file absent, starting empty");
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path).map_err(|e| GraphError::io(&self.path, e))?;
        let doc = NodeLinkGraph::from_json(&json)?;
        debug!(
            nodes = doc.nodes.len(),
            edges = doc.edges.len(),
            "Loaded graph file"
        );
        Ok(Some(doc))
    }

    /// Overwrite the file with `doc`, creating parent directories as needed.
    #[instrument(skip(self, doc), fields(path = %self.path.display()))]
    pub fn save(&self, doc: &NodeLinkGraph) -> GraphResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| GraphError::io(parent, e))?;
            }
        }
        let json = doc.to_json_pretty()?;
        fs::write(&self.path, json).map_err(|e| GraphError::io(&self.path, e))?;
        debug!(
            nodes = doc.nodes.len(),
            edges = doc.edges.len(),
            "Saved graph file"
        );
        Ok(())
    }
}

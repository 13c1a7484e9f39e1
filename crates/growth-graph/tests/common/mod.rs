//! Shared test infrastructure for growth-graph integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use growth_graph::GrowthGraph;
use growth_types::GraphConfig;

/// Temp directory holding a graph file and source documents.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Graph file location (absent until the first save)
    pub graph_path: PathBuf,
    /// Directory for source documents
    pub docs_dir: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let graph_path = temp_dir.path().join("graph").join("growth.json");
        let docs_dir = temp_dir.path().join("docs");
        std::fs::create_dir_all(&docs_dir).expect("Failed to create docs dir");

        Self {
            _temp_dir: temp_dir,
            graph_path,
            docs_dir,
        }
    }

    /// Write a source document and return its path.
    pub fn write_doc(&self, name: &str, text: &str) -> PathBuf {
        let path = self.docs_dir.join(name);
        std::fs::write(&path, text).expect("Failed to write document");
        path
    }

    /// Open the graph with the default configuration.
    pub fn open(&self) -> GrowthGraph {
        self.open_with(GraphConfig::default())
    }

    pub fn open_with(&self, config: GraphConfig) -> GrowthGraph {
        GrowthGraph::open(&self.graph_path, config).expect("Failed to open graph")
    }

    /// Raw graph file contents.
    pub fn graph_json(&self) -> String {
        std::fs::read_to_string(&self.graph_path).expect("Failed to read graph file")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// `count` distinct alphabetic words starting with `prefix`.
pub fn words(prefix: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let hi = (b'a' + (i / 26) as u8) as char;
            let lo = (b'a' + (i % 26) as u8) as char;
            format!("{prefix}{hi}{lo}")
        })
        .collect()
}

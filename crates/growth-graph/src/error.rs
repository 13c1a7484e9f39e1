//! Graph engine error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Reading a document or reading/writing the graph file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Node not found
    #[error("Node not found: {0}")]
    NotFound(String),

    /// Different content hashed to an id already in the graph
    #[error("Node id collision: {id} is already taken by different content ({path})")]
    Collision { id: String, path: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

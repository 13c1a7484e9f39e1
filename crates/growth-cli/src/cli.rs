//! CLI argument parsing for the growth binary.
//!
//! CLI flags override every other configuration source.

use clap::{Parser, Subcommand};

/// Growth Graph
///
/// Grow a graph of documents linked by the terms they share.
#[derive(Parser, Debug)]
#[command(name = "growth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default <config dir>/growth-graph/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override graph file path
    #[arg(short, long, global = true)]
    pub graph: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Graph commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest documents into the graph
    Add {
        /// Document files, ingested in order
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Attach curation text to a node
    Shape {
        /// Node id
        id: String,

        /// One-line summary shown as the node label
        #[arg(short, long, default_value = "")]
        sentence: String,

        /// Longer description shown on hover
        #[arg(short, long, default_value = "")]
        paragraph: String,
    },

    /// Connect a node to similar, not yet linked nodes
    Expand {
        /// Node id
        id: String,

        /// Minimum overlap similarity in [0, 1] (default from config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Show topic clusters
    Clusters {
        /// Maximum number of clusters (default from config)
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Print the render view as JSON
    View,

    /// Show graph statistics
    Stats,
}

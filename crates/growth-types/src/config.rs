//! Configuration loading for the growth graph.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at `<config dir>/growth-graph/config.toml`.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::GrowthError;

/// Which implementation of a swappable component to use.
///
/// `Rich` is the full-featured implementation, `Minimal` the dependency-free
/// fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    Rich,
    Minimal,
}

/// Graph store implementation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// petgraph-backed store (requires the `petgraph` feature)
    #[default]
    Petgraph,
    /// Built-in adjacency map
    Adjacency,
}

/// Tokenizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Shortest token kept
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,

    /// Stopwords added to the built-in list
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            min_token_len: default_min_token_len(),
            extra_stopwords: Vec::new(),
        }
    }
}

fn default_min_token_len() -> usize {
    2
}

/// Term weighting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightingConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Number of ranked terms kept per node
    #[serde(default = "default_max_terms")]
    pub max_terms: usize,

    /// Use smoothed idf `ln((N+1)/(df+1)) + 1` instead of `log2(N/df)`
    #[serde(default = "default_true")]
    pub smooth_idf: bool,
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            max_terms: default_max_terms(),
            smooth_idf: default_true(),
        }
    }
}

fn default_max_terms() -> usize {
    20
}

fn default_true() -> bool {
    true
}

/// Graph store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
}

/// Clustering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Upper bound on the number of clusters
    #[serde(default = "default_max_clusters")]
    pub max_clusters: usize,

    /// Representative terms reported per cluster
    #[serde(default = "default_top_terms")]
    pub top_terms: usize,

    /// Fixed RNG seed for centroid initialization
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Lloyd iteration cap
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            max_clusters: default_max_clusters(),
            top_terms: default_top_terms(),
            seed: default_seed(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_max_clusters() -> usize {
    5
}
fn default_top_terms() -> usize {
    5
}
fn default_seed() -> u64 {
    42
}
fn default_max_iterations() -> usize {
    300
}

/// Edge expansion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkingConfig {
    /// Default similarity threshold for `expand`
    #[serde(default = "default_expand_threshold")]
    pub expand_threshold: f64,
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            expand_threshold: default_expand_threshold(),
        }
    }
}

fn default_expand_threshold() -> f64 {
    0.5
}

/// Engine configuration: one section per swappable component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub weighting: WeightingConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub clustering: ClusteringConfig,

    #[serde(default)]
    pub linking: LinkingConfig,
}

impl GraphConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.extraction.min_token_len == 0 {
            return Err("extraction.min_token_len must be > 0".to_string());
        }
        if self.weighting.max_terms == 0 {
            return Err("weighting.max_terms must be > 0".to_string());
        }
        if self.clustering.top_terms == 0 {
            return Err("clustering.top_terms must be > 0".to_string());
        }
        if self.clustering.max_iterations == 0 {
            return Err("clustering.max_iterations must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.linking.expand_threshold) {
            return Err(format!(
                "linking.expand_threshold must be 0.0-1.0, got {}",
                self.linking.expand_threshold
            ));
        }
        Ok(())
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the node-link JSON graph file
    #[serde(default = "default_graph_path")]
    pub graph_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Engine configuration
    #[serde(default)]
    pub graph: GraphConfig,
}

fn default_graph_path() -> String {
    ProjectDirs::from("", "", "growth-graph")
        .map(|p| p.data_local_dir().join("graph.json"))
        .unwrap_or_else(|| PathBuf::from("./growth_graph.json"))
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            graph_path: default_graph_path(),
            log_level: default_log_level(),
            graph: GraphConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (`<config dir>/growth-graph/config.toml`)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (`GROWTH_*`, nested with `__`)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, GrowthError> {
        let config_dir = ProjectDirs::from("", "", "growth-graph")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("graph_path", default_graph_path())
            .map_err(|e| GrowthError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| GrowthError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // GROWTH_GRAPH_PATH, GROWTH_GRAPH__WEIGHTING__MAX_TERMS, ...
        builder = builder.add_source(
            Environment::with_prefix("GROWTH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| GrowthError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| GrowthError::Config(e.to_string()))?;
        settings.graph.validate().map_err(GrowthError::Config)?;
        Ok(settings)
    }

    /// Expand a leading `~/` in `graph_path` to the home directory.
    pub fn expanded_graph_path(&self) -> PathBuf {
        if let Some(rest) = self.graph_path.strip_prefix("~/") {
            if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
                return home.join(rest);
            }
        }
        PathBuf::from(&self.graph_path)
    }
}

//! Command implementations for the growth binary.
//!
//! Handles:
//! - Layered settings with CLI overrides
//! - Tracing setup
//! - Dispatch of graph commands, each rendered to a printable string

use anyhow::{Context, Result};
use tracing::info;

use growth_graph::{GrowthGraph, IngestOutcome};
use growth_types::Settings;

use crate::cli::{Cli, Commands};

/// Load settings and apply CLI overrides (highest precedence).
pub fn load_settings(
    config_path: Option<&str>,
    graph_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(graph_path) = graph_override {
        settings.graph_path = graph_path.to_string();
    }
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    Ok(settings)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so command
/// output on stdout stays machine-readable.
pub fn init_tracing(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Run a parsed command line end to end.
pub fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(
        cli.config.as_deref(),
        cli.graph.as_deref(),
        cli.log_level.as_deref(),
    )?;
    init_tracing(&settings.log_level)?;

    let graph_path = settings.expanded_graph_path();
    info!(graph = %graph_path.display(), "Opening graph");
    let mut graph = GrowthGraph::open(&graph_path, settings.graph.clone())
        .with_context(|| format!("Failed to open graph at {}", graph_path.display()))?;

    let output = execute(&mut graph, &settings, cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Execute one command against an open graph and render its result.
pub fn execute(graph: &mut GrowthGraph, settings: &Settings, command: Commands) -> Result<String> {
    match command {
        Commands::Add { paths } => handle_add(graph, &paths),
        Commands::Shape {
            id,
            sentence,
            paragraph,
        } => handle_shape(graph, &id, &sentence, &paragraph),
        Commands::Expand { id, threshold } => {
            let threshold = threshold.unwrap_or(settings.graph.linking.expand_threshold);
            handle_expand(graph, &id, threshold)
        }
        Commands::Clusters { max } => {
            let max = max.unwrap_or(settings.graph.clustering.max_clusters);
            Ok(handle_clusters(graph, max))
        }
        Commands::View => handle_view(graph),
        Commands::Stats => Ok(handle_stats(graph)),
    }
}

fn handle_add(graph: &mut GrowthGraph, paths: &[String]) -> Result<String> {
    let mut lines = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = graph
            .submit_document(path)
            .with_context(|| format!("Failed to ingest {path}"))?;
        let line = match outcome {
            IngestOutcome::Added { id, terms, edges } => {
                format!("added {id} {path} ({terms} terms, {edges} edges)")
            }
            IngestOutcome::Refreshed { id, edges } => {
                format!("refreshed {id} {path} ({edges} edges)")
            }
            IngestOutcome::Skipped => format!("skipped {path} (no terms)"),
        };
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn handle_shape(graph: &mut GrowthGraph, id: &str, sentence: &str, paragraph: &str) -> Result<String> {
    let shaped = graph
        .shape_node(id, sentence, paragraph)
        .with_context(|| format!("Failed to shape node {id}"))?;
    Ok(if shaped {
        format!("shaped {id}")
    } else {
        format!("node {id} not found")
    })
}

fn handle_expand(graph: &mut GrowthGraph, id: &str, threshold: f64) -> Result<String> {
    let added = graph
        .expand_node(id, threshold)
        .with_context(|| format!("Failed to expand node {id}"))?;
    Ok(match added {
        Some(added) => format!("expanded {id}: {added} new edges (threshold {threshold})"),
        None => format!("node {id} not found"),
    })
}

fn handle_clusters(graph: &GrowthGraph, max_clusters: usize) -> String {
    let clusters = graph.cluster_terms(max_clusters);
    if clusters.is_empty() {
        return "no clusters".to_string();
    }
    clusters
        .iter()
        .enumerate()
        .map(|(i, terms)| format!("{}: {}", i + 1, terms.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn handle_view(graph: &GrowthGraph) -> Result<String> {
    serde_json::to_string_pretty(&graph.view()).context("Failed to serialize graph view")
}

fn handle_stats(graph: &GrowthGraph) -> String {
    let stats = graph.stats();
    [
        format!("Graph:     {}", stats.path.display()),
        format!("Nodes:     {}", stats.nodes),
        format!("Edges:     {}", stats.edges),
        format!("Shaped:    {}", stats.shaped),
        format!("Store:     {}", stats.store),
        format!("Extractor: {}", stats.extractor),
        format!("Weighter:  {}", stats.weighter),
        format!("Clusterer: {}", stats.clusterer),
    ]
    .join("\n")
}

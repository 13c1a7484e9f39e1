//! Growth CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (add, shape, expand, clusters, view, stats)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{execute, init_tracing, load_settings, run};

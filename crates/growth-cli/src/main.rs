//! Growth Graph CLI
//!
//! # Usage
//!
//! ```bash
//! growth add notes/*.md
//! growth shape 3f2a9c1d --sentence "Roots" --paragraph "Where it started."
//! growth expand 3f2a9c1d --threshold 0.3
//! growth clusters --max 4
//! growth view > graph-view.json
//! growth stats
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (<config dir>/growth-graph/config.toml)
//! 3. `--config` file
//! 4. Environment variables (GROWTH_*)
//! 5. CLI flags

use anyhow::Result;
use clap::Parser;

use growth_cli::{run, Cli};

fn main() -> Result<()> {
    run(Cli::parse())
}

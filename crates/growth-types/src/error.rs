//! Error types shared across the growth graph crates.

use thiserror::Error;

/// Error type for settings and domain-type operations.
#[derive(Debug, Error)]
pub enum GrowthError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Error types for pgtail
//!
//! Library modules define their own `thiserror` enums; this module folds them
//! into one crate-level error so callers can use a single `Result` alias.

use thiserror::Error;

use crate::config::ConfigError;
use crate::highlighting::HighlightError;

/// Main error type for pgtail operations
#[derive(Error, Debug)]
pub enum PgtailError {
    /// Highlighter construction or registration failed
    #[error("Highlighting error: {0}")]
    Highlight(#[from] HighlightError),

    /// Configuration could not be loaded, saved or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for pgtail operations
pub type Result<T> = std::result::Result<T, PgtailError>;

/// Convert anyhow::Error to PgtailError
impl From<anyhow::Error> for PgtailError {
    fn from(err: anyhow::Error) -> Self {
        PgtailError::Other(err.to_string())
    }
}

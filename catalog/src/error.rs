//! Error types for catalog loading.

use std::path::PathBuf;

use switchline_core::ConfigurationError;
use thiserror::Error;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A description parsed but could not be registered.
    #[error("{}: {source}", path.display())]
    Configuration {
        path: PathBuf,
        source: ConfigurationError,
    },

    /// Two files describe the same command.
    #[error("command '{command}' is described by both {} and {}", first.display(), second.display())]
    DuplicateCommand {
        command: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// The file extension is not `json`, `yaml` or `yml`.
    #[error("unsupported schema format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// All configured loader sources failed.
    #[error("no schema sources available")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;

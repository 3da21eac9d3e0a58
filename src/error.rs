//! Error types for the analytics-events-gen crate.

use std::path::PathBuf;

/// Errors that can occur while generating event classes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema text is not a valid event schema.
    #[error("failed to parse event schema: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read the schema file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a generated source file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An event has no `screen_name` parameter and strict mode is enabled.
    #[error("screen_name parameter is not defined for event '{event}' in category '{category}'")]
    MissingScreenName { category: String, event: String },

    /// Generator options are unusable (e.g. an invalid package name).
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for cj-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cj-core
///
/// Data-quality problems are never errors; they surface as
/// [`Warning`](crate::validator::Warning)s instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV
    #[error("failed to parse CSV '{path}': {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A table was built without a header row
    #[error("table has no header row")]
    MissingHeader,

    /// Input file not found in any search location
    #[error("input file '{name}' not found (searched: {})", display_paths(.searched))]
    InputNotFound { name: String, searched: Vec<PathBuf> },

    /// Config document is malformed, misses a required field or names an
    /// unknown join type
    #[error("invalid config '{path}': {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Explicit config path does not exist
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// No config document found during discovery
    #[error("no .json config file found in '{0}'")]
    NoConfigFound(PathBuf),

    /// More than one config document found during discovery
    #[error("multiple config files found in '{dir}', choose one of: {}", display_paths(.candidates))]
    AmbiguousConfig {
        dir: PathBuf,
        candidates: Vec<PathBuf>,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

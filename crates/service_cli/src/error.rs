//! CLI error handling.

use thiserror::Error;

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-level errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file was not found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// An input file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A trade request file failed to parse.
    #[error("Failed to parse trade file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A command argument was invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The engine rejected the operation.
    #[error(transparent)]
    Engine(#[from] engine_lifecycle::EngineError),

    /// A filter expression failed to parse or translate.
    #[error(transparent)]
    Query(#[from] engine_query::QueryError),
}

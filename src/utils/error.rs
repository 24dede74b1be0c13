//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while scanning a coverage trace
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("malformed line-hit entry at line {line}: DA:{payload}")]
    MalformedHitEntry { line: usize, payload: String },

    #[error("line-hit entry outside any source-file section at line {line}")]
    OrphanHitEntry { line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while writing the diff report
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while taking directory snapshots
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("no command given to observe")]
    EmptyCommand,

    #[error("failed to spawn command '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

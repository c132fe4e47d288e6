//! Error types for shard consolidation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a consolidation run.
///
/// Expected conditions (empty folders, tables that are missing or already
/// flat) are not errors; they are reported through
/// [`TableOutcome`](crate::TableOutcome).
#[derive(Debug, Error)]
pub enum ConsolidateError {
    // === File System Errors ===
    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to stat a shard file.
    #[error("failed to read metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read a shard file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Output Errors ===
    /// Failed to create the consolidated CSV.
    #[error("failed to create output {path}: {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a record to the consolidated CSV.
    #[error("failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to flush the consolidated CSV to disk.
    #[error("failed to flush output {path}: {source}")]
    OutputFlush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for consolidation operations.
pub type Result<T> = std::result::Result<T, ConsolidateError>;

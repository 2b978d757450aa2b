//! Error types for tabular ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised before any computation is attempted.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Input Shape Errors ===
    /// Fewer than two non-blank lines (no header, or a header without data).
    #[error("input must contain a header and at least one data row (found {found} non-blank lines)")]
    TooFewLines { found: usize },

    /// A required request field was empty.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    // === File Errors ===
    /// Failed to read an input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

//! Persistence error types.

use std::path::PathBuf;

use thiserror::Error;

/// Persistence gateway error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No analysis with this id exists.
    #[error("analysis not found: {id}")]
    NotFound { id: String },

    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded or decoded.
    #[error("failed to (de)serialize analysis record {path}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record holds a NaN or infinite figure that JSON cannot represent.
    #[error("analysis record has a non-finite value in {field}")]
    NonFinite { field: String },

    /// A blocking storage task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(String),
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { id } => format!("No analysis with id {id} was found."),
            Self::Io {
                operation, path, ..
            } => format!("Could not {operation} {}", path.display()),
            Self::Serialization { path, .. } => {
                format!("The analysis file at {} is corrupted.", path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!("Could not save {}", target_path.display())
            }
            Self::NonFinite { field } => {
                format!("The statistics for {field} are out of range and were not saved.")
            }
            Self::Task(_) => "An internal storage error occurred.".to_string(),
        }
    }

    /// Whether the failure is caused by a missing record rather than the backend.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, StoreError>;

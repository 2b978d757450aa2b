//! Pipeline errors.

use thiserror::Error;

use tabula_ingest::IngestError;
use tabula_store::StoreError;

/// Errors surfaced to the caller of [`Analyzer::analyze`](crate::Analyzer::analyze).
///
/// Provider failures never appear here; they are absorbed by the fallback
/// path.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input could not be ingested.
    #[error(transparent)]
    Input(#[from] IngestError),

    /// The persistence gateway failed.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl AnalysisError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(err) => format!("The dataset could not be read: {err}"),
            Self::Persistence(err) => err.user_message(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

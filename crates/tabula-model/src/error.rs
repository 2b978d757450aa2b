use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid dataset id: {0:?}")]
    InvalidDatasetId(String),
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),
    #[error("invalid analysis id: {0:?}")]
    InvalidAnalysisId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

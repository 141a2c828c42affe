//! Error types shared by the store, matcher and surfaces.

use thiserror::Error;

use crate::utils::atomic::AtomicError;

/// Result type for QA operations
pub type QaResult<T> = Result<T, QaError>;

#[derive(Debug, Error)]
pub enum QaError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    Storage(#[from] AtomicError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QaError {
    pub fn invalid(message: impl Into<String>) -> Self {
        QaError::InvalidInput(message.into())
    }
}

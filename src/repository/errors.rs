use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced by the remote article repository.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure with no usable response.
    #[error("network error: {0}")]
    Network(String),

    /// The requested article does not exist (404).
    #[error("article not found")]
    NotFound,

    /// The server rejected the request (4xx) with a semantic message.
    #[error("{0}")]
    Validation(String),

    /// The server failed to process the request (5xx).
    #[error("server error: {0}")]
    Server(String),

    /// The response did not match the expected contract.
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Whether a retry has any chance of succeeding. Semantic 4xx failures
    /// are final; transport and server failures are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Unexpected(format!("failed to decode response: {err}"))
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<TypeConstraintError> for ApiError {
    fn from(err: TypeConstraintError) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}

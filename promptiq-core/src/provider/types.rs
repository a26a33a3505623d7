use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("provider API error: {0}")]
    ApiError(String),

    #[error("provider request timed out after {0:?}")]
    Timeout(Duration),

    #[error("internal provider error: {0}")]
    Internal(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

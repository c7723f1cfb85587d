//! HTTP client error types.

use thiserror::Error;

use crate::application::ports::MarketDataError;

/// Errors from the shared HTTP client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Transport failure or client construction failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-retryable status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Authentication failed (401/403).
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Resource does not exist (404).
    #[error("Not found: {url}")]
    NotFound {
        /// Requested URL.
        url: String,
    },

    /// Rate limited and out of retries.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested retry delay in seconds.
        retry_after_secs: u64,
    },

    /// Max retries exceeded.
    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Failure reported by the final attempt.
        last_error: String,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<HttpError> for MarketDataError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Network(message) => Self::ConnectionError { message },
            HttpError::MaxRetriesExceeded {
                attempts,
                last_error,
            } => Self::ConnectionError {
                message: format!("gave up after {attempts} attempts: {last_error}"),
            },
            HttpError::AuthenticationFailed => Self::AuthenticationFailed,
            HttpError::RateLimited { retry_after_secs } => Self::RateLimited { retry_after_secs },
            HttpError::JsonParse(message) => Self::InvalidResponse { message },
            HttpError::NotFound { url } => Self::ApiError {
                message: format!("not found: {url}"),
            },
            HttpError::Api { status, message } => Self::ApiError {
                message: format!("{status} - {message}"),
            },
        }
    }
}

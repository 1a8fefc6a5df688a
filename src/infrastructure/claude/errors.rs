use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::ProviderError;

/// Errors that can occur when interacting with the Claude API
#[derive(Error, Debug)]
pub enum ClaudeApiError {
    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid or missing API key (HTTP 401)
    #[error("Invalid API key - authentication failed")]
    InvalidApiKey,

    /// Forbidden - permission denied (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// API overloaded (HTTP 529)
    #[error("API overloaded")]
    Overloaded,

    /// Server error from Claude API (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body did not match the expected schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Unknown or unexpected error
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl ClaudeApiError {
    /// Map an HTTP error status and body to an error variant
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest(body),
            401 => Self::InvalidApiKey,
            403 => Self::Forbidden(body),
            404 => Self::NotFound,
            408 => Self::Timeout,
            429 => Self::RateLimitExceeded,
            529 => Self::Overloaded,
            _ if status.is_server_error() => Self::ServerError(status, body),
            _ => Self::UnknownError(status, body),
        }
    }

    /// Returns true if this error is transient and should be retried
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded
                | Self::Overloaded
                | Self::ServerError(_, _)
                | Self::Timeout
                | Self::NetworkError(_)
                | Self::MalformedResponse(_)
        )
    }

    /// Returns true if this is a permanent error that should not be retried
    pub const fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

impl From<reqwest::Error> for ClaudeApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::NetworkError(err)
        }
    }
}

impl From<ClaudeApiError> for ProviderError {
    fn from(err: ClaudeApiError) -> Self {
        let message = err.to_string();
        match err {
            ClaudeApiError::InvalidRequest(_) | ClaudeApiError::NotFound => {
                Self::InvalidRequest(message)
            }
            ClaudeApiError::InvalidApiKey | ClaudeApiError::Forbidden(_) => {
                Self::Authentication(message)
            }
            ClaudeApiError::RateLimitExceeded => Self::RateLimited(message),
            ClaudeApiError::Overloaded | ClaudeApiError::ServerError(_, _) => {
                Self::Server(message)
            }
            ClaudeApiError::NetworkError(_) => Self::Network(message),
            ClaudeApiError::Timeout => Self::Timeout(message),
            ClaudeApiError::MalformedResponse(_) => Self::MalformedResponse(message),
            ClaudeApiError::UnknownError(_, _) => Self::Unknown(message),
        }
    }
}

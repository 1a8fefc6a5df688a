//! Domain errors for campaign runs.

use thiserror::Error;

/// Failure from an external provider (language model or search tool).
///
/// Variants are split into transient failures, which the role agent retries
/// within its budget, and permanent ones, which end the run immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Provider server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Tool loop did not settle after {0} rounds")]
    ToolLoopExhausted(u32),

    #[error("Unknown provider error: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// Returns true if retrying the same call may succeed.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_)
                | Self::Timeout(_)
                | Self::Server(_)
                | Self::Network(_)
                | Self::EmptyResponse
                | Self::MalformedResponse(_)
        )
    }

    /// Short machine-readable code for API responses and logs.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::RateLimited(_) => "RATE_LIMITED",
            Self::Timeout(_) => "TIMEOUT",
            Self::Server(_) => "SERVER_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::EmptyResponse => "EMPTY_RESPONSE",
            Self::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Self::Authentication(_) => "AUTHENTICATION_FAILED",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ToolLoopExhausted(_) => "TOOL_LOOP_EXHAUSTED",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

//! Claude Messages API client
//!
//! - Typed request/response structures
//! - Token bucket rate limiting
//! - HTTP status classification into [`ClaudeApiError`]

pub mod client;
pub mod errors;
pub mod rate_limiter;
pub mod types;

pub use client::{ClaudeClient, ClaudeClientConfig};
pub use errors::ClaudeApiError;
pub use rate_limiter::TokenBucketRateLimiter;
pub use types::{ContentBlock, Message, MessageRequest, MessageResponse, StopReason, Tool, Usage};

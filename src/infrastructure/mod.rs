//! Infrastructure layer module
//!
//! External integrations and process-wide plumbing:
//! - Claude Messages API client
//! - Tavily web search client
//! - Configuration management
//! - Logging infrastructure
//! - Retry policy for transient provider errors
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod claude;
pub mod config;
pub mod logging;
pub mod retry;
pub mod search;

pub mod config;
pub mod message;
pub mod role;
pub mod run;

pub use config::{
    Config, LoggingConfig, ModelConfig, RateLimitConfig, RetryConfig, SearchConfig, ServerConfig,
    WorkflowConfig,
};
pub use message::{Author, Conversation, Message};
pub use role::RoleName;
pub use run::{Route, RunOutcome, RunReport, Transition};

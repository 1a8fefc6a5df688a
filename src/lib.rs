//! Campaign Crew - collaborative marketing agents
//!
//! Four roles (content writer, graphic designer, data analyst, brand
//! manager) take turns on a shared conversation about a campaign request.
//! The run ends as soon as one of them replies with `FINAL ANSWER`, or when
//! the step ceiling is reached. The data analyst can search the web.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): roles, conversation, run outcomes and provider ports
//! - **Service Layer** (`services`): prompts, routing, role agents and the workflow engine
//! - **Infrastructure Layer** (`infrastructure`): Claude and Tavily clients, config, logging, retry
//! - **Adapters** (`adapters`): chat model adapter, HTTP front end, scripted providers
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use campaign_crew::adapters::mock::{ScriptedChatModel, ScriptedSearchTool};
//! use campaign_crew::infrastructure::retry::RetryPolicy;
//! use campaign_crew::services::{Crew, WorkflowEngine};
//!
//! # async fn demo() {
//! let crew = Crew::new(
//!     Arc::new(ScriptedChatModel::always("FINAL ANSWER: Time for green.")),
//!     Arc::new(ScriptedSearchTool::empty()),
//!     RetryPolicy::default(),
//!     5,
//! );
//! let report = WorkflowEngine::new(crew, 50).run("Launch a smartwatch.").await;
//! assert!(report.outcome.is_concluded());
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::ProviderError;
pub use domain::models::{
    Config, Conversation, Message, RoleName, Route, RunOutcome, RunReport, Transition,
};
pub use domain::ports::{ChatModel, SearchTool};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CampaignResult, CampaignService, WorkflowEngine};

//! Service layer: prompts, routing, role agents and the workflow engine.

pub mod campaign_service;
pub mod prompt_builder;
pub mod role_agent;
pub mod turn_router;
pub mod workflow_engine;

pub use campaign_service::{
    strip_marker, CampaignResult, CampaignRun, CampaignService, CampaignSummary, TranscriptEntry,
    DEFAULT_REQUEST, NO_CONCLUSION_MESSAGE,
};
pub use prompt_builder::{build_system_prompt, role_description, system_prompt_for};
pub use role_agent::{data_search_spec, Crew, RoleAgent, DATA_SEARCH_TOOL, DEFAULT_MAX_TOOL_ROUNDS};
pub use turn_router::{contains_termination_marker, route, TERMINATION_MARKER};
pub use workflow_engine::{WorkflowEngine, DEFAULT_MAX_STEPS};

//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::sync::Arc;

use campaign_crew::adapters::mock::{ScriptedChatModel, ScriptedSearchTool};
use campaign_crew::domain::ports::SearchHit;
use campaign_crew::infrastructure::retry::RetryPolicy;
use campaign_crew::services::{CampaignService, Crew, WorkflowEngine, DEFAULT_MAX_TOOL_ROUNDS};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Retry policy with two retries and millisecond backoff
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(2, 1, 5)
}

/// A single canned search hit
pub fn sample_hits() -> Vec<SearchHit> {
    vec![SearchHit {
        title: "Wearables report".to_string(),
        url: "https://example.com/wearables".to_string(),
        content: "Eco-conscious buyers are mostly 25-34.".to_string(),
    }]
}

/// Engine over scripted providers with the default tool-round bound
pub fn engine_with(
    model: Arc<ScriptedChatModel>,
    search: Arc<ScriptedSearchTool>,
    max_steps: usize,
) -> WorkflowEngine {
    let crew = Crew::new(model, search, fast_retry(), DEFAULT_MAX_TOOL_ROUNDS);
    WorkflowEngine::new(crew, max_steps)
}

/// Campaign service over scripted providers
pub fn service_with(
    model: Arc<ScriptedChatModel>,
    search: Arc<ScriptedSearchTool>,
    max_steps: usize,
) -> CampaignService {
    CampaignService::new(Arc::new(engine_with(model, search, max_steps)))
}

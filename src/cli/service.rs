//! Wiring from configuration to a ready `CampaignService`.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::adapters::llm::{AnthropicChatModel, AnthropicModelSettings};
use crate::domain::models::Config;
use crate::domain::ports::{ChatModel, SearchTool};
use crate::infrastructure::claude::{ClaudeClient, ClaudeClientConfig};
use crate::infrastructure::retry::RetryPolicy;
use crate::infrastructure::search::{TavilyClient, TavilyClientConfig};
use crate::services::{CampaignService, Crew, WorkflowEngine};

/// Build the service from providers, using the retry and workflow settings in `config`.
pub fn campaign_service_with(
    config: &Config,
    model: Arc<dyn ChatModel>,
    search: Arc<dyn SearchTool>,
) -> CampaignService {
    let crew = Crew::new(
        model,
        search,
        RetryPolicy::from(&config.retry),
        config.workflow.max_tool_rounds,
    );
    CampaignService::new(Arc::new(WorkflowEngine::new(crew, config.workflow.max_steps)))
}

/// Build the service against the real Anthropic and Tavily APIs.
pub fn build_campaign_service(config: &Config) -> Result<CampaignService> {
    let anthropic_key = config
        .model
        .resolve_api_key()
        .context("No Anthropic API key: set ANTHROPIC_API_KEY or model.api_key")?;
    let tavily_key = config
        .search
        .resolve_api_key()
        .context("No Tavily API key: set TAVILY_API_KEY or search.api_key")?;

    let client = ClaudeClient::new(ClaudeClientConfig::from_model_config(
        &config.model,
        anthropic_key,
        config.rate_limit.requests_per_second,
    ))
    .context("Failed to create Claude API client")?;
    let model = AnthropicChatModel::new(client, AnthropicModelSettings::from(&config.model));

    let search = TavilyClient::new(TavilyClientConfig::from_search_config(
        &config.search,
        tavily_key,
    ))
    .context("Failed to create Tavily search client")?;

    tracing::debug!(model = %config.model.model, "campaign service ready");

    Ok(campaign_service_with(
        config,
        Arc::new(model),
        Arc::new(search),
    ))
}

//! Role agents: one model-backed participant per crew role.
//!
//! An agent renders the shared conversation from its own point of view,
//! asks the model for the next contribution and, for the data analyst, runs
//! the DataSearch tool until the model settles on a text answer. Agents keep
//! no state between invocations.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::domain::errors::ProviderError;
use crate::domain::models::{Author, Conversation, Message, RoleName};
use crate::domain::ports::{
    render_hits, ChatBlock, ChatModel, ChatRequest, ChatResponse, ChatRole, ChatTurn, SearchTool,
    ToolSpec,
};
use crate::infrastructure::retry::RetryPolicy;
use crate::services::prompt_builder::system_prompt_for;

/// Name of the web search tool offered to the data analyst.
pub const DATA_SEARCH_TOOL: &str = "DataSearch";

/// Default bound on model/tool round trips within one turn.
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 5;

/// Tool definition for DataSearch.
pub fn data_search_spec() -> ToolSpec {
    ToolSpec {
        name: DATA_SEARCH_TOOL.to_string(),
        description: "Use this tool to get relevant data and insights.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Web search query"
                }
            },
            "required": ["query"]
        }),
    }
}

/// A crew member backed by a chat model.
#[derive(Clone)]
pub struct RoleAgent {
    role: RoleName,
    system_prompt: String,
    model: Arc<dyn ChatModel>,
    search: Option<Arc<dyn SearchTool>>,
    retry: RetryPolicy,
    max_tool_rounds: u32,
}

impl RoleAgent {
    pub fn new(role: RoleName, model: Arc<dyn ChatModel>, retry: RetryPolicy) -> Self {
        Self {
            role,
            system_prompt: system_prompt_for(role),
            model,
            search: None,
            retry,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Give this agent the DataSearch tool.
    #[must_use]
    pub fn with_search(mut self, search: Arc<dyn SearchTool>) -> Self {
        self.search = Some(search);
        self
    }

    #[must_use]
    pub const fn with_max_tool_rounds(mut self, rounds: u32) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub const fn role(&self) -> RoleName {
        self.role
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Tools offered to the model on every call.
    pub fn tools(&self) -> Vec<ToolSpec> {
        if self.search.is_some() {
            vec![data_search_spec()]
        } else {
            Vec::new()
        }
    }

    /// Render the conversation as alternating model turns.
    ///
    /// The role's own messages become assistant turns. Everything else is a
    /// user turn, with role messages labelled `[RoleName]: `. Adjacent turns
    /// on the same side are merged.
    pub fn render_turns(&self, conversation: &Conversation) -> Vec<ChatTurn> {
        let mut turns: Vec<ChatTurn> = Vec::with_capacity(conversation.len());

        for message in conversation {
            let (side, text) = match message.author() {
                Author::Role(role) if role == self.role => {
                    (ChatRole::Assistant, message.content().to_string())
                }
                Author::Role(role) => (
                    ChatRole::User,
                    format!("[{}]: {}", role.display_name(), message.content()),
                ),
                Author::User => (ChatRole::User, message.content().to_string()),
            };

            match turns.last_mut() {
                Some(last) if last.role == side => {
                    if let Some(ChatBlock::Text { text: existing }) = last.blocks.last_mut() {
                        existing.push_str("\n\n");
                        existing.push_str(&text);
                    } else {
                        last.blocks.push(ChatBlock::text(text));
                    }
                }
                _ => turns.push(ChatTurn {
                    role: side,
                    blocks: vec![ChatBlock::text(text)],
                }),
            }
        }

        turns
    }

    /// Produce this role's next message for the conversation.
    ///
    /// Tool exchanges stay private to this call; only the final text is
    /// returned. Provider failures surface after the retry budget is spent.
    #[instrument(skip(self, conversation), fields(role = %self.role, messages = conversation.len()))]
    pub async fn respond(&self, conversation: &Conversation) -> Result<Message, ProviderError> {
        let mut request = ChatRequest {
            system: self.system_prompt.clone(),
            turns: self.render_turns(conversation),
            tools: self.tools(),
        };
        let mut rounds = 0;

        loop {
            let response = self
                .retry
                .execute(|| self.complete_once(&request))
                .await?;

            if !response.has_tool_calls() {
                return Ok(Message::from_role(self.role, response.text()));
            }

            if rounds >= self.max_tool_rounds {
                warn!(rounds, "model kept requesting tools");
                return Err(ProviderError::ToolLoopExhausted(self.max_tool_rounds));
            }
            rounds += 1;

            let mut results = Vec::new();
            for (id, name, input) in response.tool_calls() {
                results.push(self.run_tool(id, name, input).await?);
            }

            request.turns.push(ChatTurn {
                role: ChatRole::Assistant,
                blocks: response.blocks,
            });
            request.turns.push(ChatTurn {
                role: ChatRole::User,
                blocks: results,
            });
        }
    }

    async fn complete_once(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let response = self.model.complete(request).await?;
        if !response.has_tool_calls() && response.text().trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(response)
    }

    /// Execute one tool call, answering unusable calls with an error result.
    async fn run_tool(
        &self,
        id: &str,
        name: &str,
        input: &serde_json::Value,
    ) -> Result<ChatBlock, ProviderError> {
        let search = match &self.search {
            Some(search) if name == DATA_SEARCH_TOOL => search,
            _ => {
                warn!(tool = name, "model requested an unknown tool");
                return Ok(tool_error(id, format!("Unknown tool: {name}")));
            }
        };

        let Some(query) = input.get("query").and_then(serde_json::Value::as_str) else {
            return Ok(tool_error(id, "Missing required string field 'query'"));
        };

        debug!(query, "running DataSearch");
        let hits = self.retry.execute(|| search.search(query)).await?;

        Ok(ChatBlock::ToolResult {
            tool_use_id: id.to_string(),
            content: render_hits(&hits),
            is_error: false,
        })
    }
}

fn tool_error(id: &str, message: impl Into<String>) -> ChatBlock {
    ChatBlock::ToolResult {
        tool_use_id: id.to_string(),
        content: message.into(),
        is_error: true,
    }
}

/// The four agents, built once and shared by every run.
#[derive(Clone)]
pub struct Crew {
    agents: [RoleAgent; 4],
}

impl Crew {
    /// Build the crew. Only the data analyst receives `search`.
    pub fn new(
        model: Arc<dyn ChatModel>,
        search: Arc<dyn SearchTool>,
        retry: RetryPolicy,
        max_tool_rounds: u32,
    ) -> Self {
        let agents = RoleName::ALL.map(|role| {
            let agent = RoleAgent::new(role, Arc::clone(&model), retry.clone())
                .with_max_tool_rounds(max_tool_rounds);
            if role == RoleName::DataAnalyst {
                agent.with_search(Arc::clone(&search))
            } else {
                agent
            }
        });

        Self { agents }
    }

    pub fn agent(&self, role: RoleName) -> &RoleAgent {
        let index = match role {
            RoleName::ContentWriter => 0,
            RoleName::GraphicDesigner => 1,
            RoleName::DataAnalyst => 2,
            RoleName::BrandManager => 3,
        };
        &self.agents[index]
    }

    pub fn agents(&self) -> &[RoleAgent] {
        &self.agents
    }
}

//! Anthropic Messages API chat model.
//!
//! Translates provider-neutral chat requests into Messages API payloads and
//! back. Transport, rate limiting and status classification live in
//! [`ClaudeClient`].

use async_trait::async_trait;

use crate::domain::errors::ProviderError;
use crate::domain::models::ModelConfig;
use crate::domain::ports::{ChatBlock, ChatModel, ChatRequest, ChatResponse, ChatRole, ChatTurn};
use crate::infrastructure::claude::{
    ClaudeClient, ContentBlock, Message, MessageRequest, MessageResponse, Tool,
};

/// Generation settings applied to every call.
#[derive(Debug, Clone)]
pub struct AnthropicModelSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&ModelConfig> for AnthropicModelSettings {
    fn from(config: &ModelConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// `ChatModel` backed by the Anthropic Messages API.
pub struct AnthropicChatModel {
    client: ClaudeClient,
    settings: AnthropicModelSettings,
}

impl AnthropicChatModel {
    pub const fn new(client: ClaudeClient, settings: AnthropicModelSettings) -> Self {
        Self { client, settings }
    }

    fn build_request(&self, request: &ChatRequest) -> MessageRequest {
        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(
                request
                    .tools
                    .iter()
                    .map(|spec| Tool {
                        name: spec.name.clone(),
                        description: spec.description.clone(),
                        input_schema: spec.input_schema.clone(),
                    })
                    .collect(),
            )
        };

        MessageRequest {
            model: self.settings.model.clone(),
            messages: request.turns.iter().map(to_wire_message).collect(),
            max_tokens: self.settings.max_tokens,
            system: (!request.system.is_empty()).then(|| request.system.clone()),
            temperature: Some(self.settings.temperature),
            tools,
        }
    }
}

fn to_wire_message(turn: &ChatTurn) -> Message {
    let role = match turn.role {
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    };

    Message {
        role: role.to_string(),
        content: turn.blocks.iter().map(to_wire_block).collect(),
    }
}

fn to_wire_block(block: &ChatBlock) -> ContentBlock {
    match block {
        ChatBlock::Text { text } => ContentBlock::Text { text: text.clone() },
        ChatBlock::ToolUse { id, name, input } => ContentBlock::ToolUse {
            id: id.clone(),
            name: name.clone(),
            input: input.clone(),
        },
        ChatBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => ContentBlock::ToolResult {
            tool_use_id: tool_use_id.clone(),
            content: content.clone(),
            is_error: is_error.then_some(true),
        },
    }
}

fn from_wire_response(response: MessageResponse) -> ChatResponse {
    let blocks = response
        .content
        .into_iter()
        .map(|block| match block {
            ContentBlock::Text { text } => ChatBlock::Text { text },
            ContentBlock::ToolUse { id, name, input } => ChatBlock::ToolUse { id, name, input },
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => ChatBlock::ToolResult {
                tool_use_id,
                content,
                is_error: is_error.unwrap_or(false),
            },
        })
        .collect();

    ChatResponse {
        blocks,
        stop_reason: response.stop_reason.map(|r| r.as_str().to_string()),
    }
}

#[async_trait]
impl ChatModel for AnthropicChatModel {
    fn model_id(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let wire = self.build_request(request);
        let response = self.client.send_message(&wire).await?;
        Ok(from_wire_response(response))
    }
}

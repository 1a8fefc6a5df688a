//! Chat model port
//!
//! Provider-neutral request/response shapes for a language model that can
//! answer with text or ask for tool calls. Adapters translate these into
//! their wire format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ProviderError;

/// Side of the exchange a turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One piece of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        is_error: bool,
    },
}

impl ChatBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// A turn in the model-facing exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub blocks: Vec<ChatBlock>,
}

impl ChatTurn {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            blocks: vec![ChatBlock::text(text)],
        }
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            blocks: vec![ChatBlock::text(text)],
        }
    }
}

/// A tool the model may call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema of the tool input
    pub input_schema: serde_json::Value,
}

/// A completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// System instruction
    pub system: String,
    /// Alternating user/assistant turns, first turn from the user
    pub turns: Vec<ChatTurn>,
    /// Tools offered for this call (empty for most roles)
    pub tools: Vec<ToolSpec>,
}

/// A completion response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatResponse {
    pub blocks: Vec<ChatBlock>,
    pub stop_reason: Option<String>,
}

impl ChatResponse {
    /// Response consisting of one text block.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![ChatBlock::text(text)],
            stop_reason: Some("end_turn".to_string()),
        }
    }

    /// All text blocks joined with newlines.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ChatBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `(id, name, input)` of every tool call in the response.
    pub fn tool_calls(&self) -> Vec<(&str, &str, &serde_json::Value)> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ChatBlock::ToolUse { id, name, input } => {
                    Some((id.as_str(), name.as_str(), input))
                }
                _ => None,
            })
            .collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, ChatBlock::ToolUse { .. }))
    }
}

/// Port trait for language model providers.
///
/// Implementations make exactly one provider call per `complete`; retrying is
/// the caller's decision.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Identifier of the underlying model, for logs.
    fn model_id(&self) -> &str;

    /// Produce the next assistant turn for `request`.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError>;
}

//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - ChatModel: language model completions with optional tool use
//! - SearchTool: web search lookups for the data analyst
//!
//! These traits keep the workflow independent of any specific provider.

pub mod chat_model;
pub mod search_tool;

pub use chat_model::{ChatBlock, ChatModel, ChatRequest, ChatResponse, ChatRole, ChatTurn, ToolSpec};
pub use search_tool::{render_hits, SearchHit, SearchTool};

//! Language model adapters implementing the `ChatModel` port.

pub mod anthropic;

pub use anthropic::{AnthropicChatModel, AnthropicModelSettings};

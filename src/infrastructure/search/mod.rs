//! Web search integration backing the DataSearch tool

pub mod tavily;

pub use tavily::{TavilyClient, TavilyClientConfig, TavilyError};

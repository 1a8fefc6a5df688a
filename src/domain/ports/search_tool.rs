//! Web search port used by the data analyst.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ProviderError;

/// One search result snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Port trait for web search providers.
///
/// Implementations return at most their configured result count and make one
/// provider call per `search`.
#[async_trait]
pub trait SearchTool: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError>;
}

/// Render hits as the text handed back to the model.
pub fn render_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No results found.".to_string();
    }

    hits.iter()
        .enumerate()
        .map(|(i, hit)| format!("[{}] {} ({})\n{}", i + 1, hit.title, hit.url, hit.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

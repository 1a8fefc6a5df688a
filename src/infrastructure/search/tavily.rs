use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::errors::ProviderError;
use crate::domain::models::SearchConfig;
use crate::domain::ports::{SearchHit, SearchTool};
use crate::infrastructure::logging::SecretScrubber;

/// Errors returned by the Tavily search API
#[derive(Error, Debug)]
pub enum TavilyError {
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error("Invalid Tavily API key")]
    Unauthorized,

    #[error("Search rate limit or plan quota exceeded")]
    RateLimited,

    #[error("Search service error ({0}): {1}")]
    Server(StatusCode, String),

    #[error("Search request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("Unexpected search response ({0}): {1}")]
    Unknown(StatusCode, String),
}

impl TavilyError {
    fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 | 422 => Self::InvalidRequest(body),
            401 | 403 => Self::Unauthorized,
            // 432/433 are Tavily's plan and pay-as-you-go limits
            429 | 432 | 433 => Self::RateLimited,
            _ if status.is_server_error() => Self::Server(status, body),
            _ => Self::Unknown(status, body),
        }
    }
}

impl From<reqwest::Error> for TavilyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

impl From<TavilyError> for ProviderError {
    fn from(err: TavilyError) -> Self {
        let message = err.to_string();
        match err {
            TavilyError::InvalidRequest(_) => Self::InvalidRequest(message),
            TavilyError::Unauthorized => Self::Authentication(message),
            TavilyError::RateLimited => Self::RateLimited(message),
            TavilyError::Server(_, _) => Self::Server(message),
            TavilyError::Timeout => Self::Timeout(message),
            TavilyError::Network(_) => Self::Network(message),
            TavilyError::MalformedResponse(_) => Self::MalformedResponse(message),
            TavilyError::Unknown(_, _) => Self::Unknown(message),
        }
    }
}

/// Configuration for the Tavily HTTP client
#[derive(Debug, Clone)]
pub struct TavilyClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// Hits returned per query
    pub max_results: u32,
    /// "basic" or "advanced"
    pub search_depth: String,
    pub timeout_secs: u64,
}

impl TavilyClientConfig {
    pub fn from_search_config(search: &SearchConfig, api_key: String) -> Self {
        Self {
            api_key,
            base_url: search.base_url.trim_end_matches('/').to_string(),
            max_results: search.max_results,
            search_depth: search.search_depth.clone(),
            timeout_secs: search.timeout_secs,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// Tavily web search client
///
/// One HTTP attempt per query; retries are applied by the calling role.
pub struct TavilyClient {
    http_client: ReqwestClient,
    base_url: String,
    max_results: u32,
    search_depth: String,
    scrubber: SecretScrubber,
}

impl TavilyClient {
    pub fn new(config: TavilyClientConfig) -> Result<Self, TavilyError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| TavilyError::InvalidRequest(format!("Invalid API key: {e}")))?,
        );

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .default_headers(headers)
            .build()
            .map_err(TavilyError::Network)?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
            max_results: config.max_results,
            search_depth: config.search_depth,
            scrubber: SecretScrubber::new(),
        })
    }

    /// Run one query and return at most `max_results` hits
    #[instrument(skip(self), fields(max_results = self.max_results))]
    pub async fn query(&self, query: &str) -> Result<Vec<SearchHit>, TavilyError> {
        let url = format!("{}/search", self.base_url);
        let body = SearchRequest {
            query,
            max_results: self.max_results,
            search_depth: &self.search_depth,
        };

        let response = self.http_client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = self.scrubber.scrub_message(&body);
            warn!("Search API error ({}): {}", status, body);
            return Err(TavilyError::from_status(status, body));
        }

        let bytes = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&bytes)
            .map_err(|e| TavilyError::MalformedResponse(e.to_string()))?;

        let hits: Vec<SearchHit> = parsed
            .results
            .into_iter()
            .take(self.max_results as usize)
            .map(|r| SearchHit {
                title: r.title,
                url: r.url,
                content: r.content,
            })
            .collect();

        debug!(hits = hits.len(), "search completed");
        Ok(hits)
    }
}

#[async_trait]
impl SearchTool for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError> {
        self.query(query).await.map_err(ProviderError::from)
    }
}

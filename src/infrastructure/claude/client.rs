use super::errors::ClaudeApiError;
use super::rate_limiter::TokenBucketRateLimiter;
use super::types::{MessageRequest, MessageResponse};
use crate::domain::models::ModelConfig;
use crate::infrastructure::logging::SecretScrubber;
use reqwest::{header, Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Configuration for the Claude HTTP client
#[derive(Debug, Clone)]
pub struct ClaudeClientConfig {
    /// Anthropic API key
    pub api_key: String,

    /// Base URL for the Claude API
    pub base_url: String,

    /// Value of the anthropic-version header
    pub api_version: String,

    /// Rate limit in requests per second
    pub rate_limit_rps: f64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClaudeClientConfig {
    /// Build client settings from the model section of the app config
    pub fn from_model_config(model: &ModelConfig, api_key: String, rate_limit_rps: f64) -> Self {
        Self {
            api_key,
            base_url: model.base_url.trim_end_matches('/').to_string(),
            api_version: model.api_version.clone(),
            rate_limit_rps,
            timeout_secs: model.timeout_secs,
        }
    }
}

/// HTTP client for interacting with the Claude API
///
/// Provides:
/// - Connection pooling and reuse
/// - Rate limiting via token bucket algorithm
/// - Compression support (gzip/brotli)
/// - Status code classification into [`ClaudeApiError`]
///
/// Each `send_message` is a single attempt; retrying belongs to the caller.
pub struct ClaudeClient {
    http_client: ReqwestClient,
    base_url: String,
    rate_limiter: TokenBucketRateLimiter,
    scrubber: SecretScrubber,
}

impl ClaudeClient {
    /// Create a new Claude API client
    ///
    /// # Example
    /// ```no_run
    /// use campaign_crew::infrastructure::claude::{ClaudeClient, ClaudeClientConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = ClaudeClient::new(ClaudeClientConfig {
    ///     api_key: "sk-ant-...".to_string(),
    ///     base_url: "https://api.anthropic.com".to_string(),
    ///     api_version: "2023-06-01".to_string(),
    ///     rate_limit_rps: 5.0,
    ///     timeout_secs: 300,
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: ClaudeClientConfig) -> Result<Self, ClaudeApiError> {
        let api_key_scrubbed = if config.api_key.chars().count() > 8 {
            let prefix: String = config.api_key.chars().take(8).collect();
            format!("{prefix}...[REDACTED]")
        } else {
            "[REDACTED]".to_string()
        };

        info!(
            "Initializing Claude API client: base_url={}, rate_limit={} rps, timeout={}s, api_key={}",
            config.base_url, config.rate_limit_rps, config.timeout_secs, api_key_scrubbed
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&config.api_key)
                .map_err(|e| ClaudeApiError::InvalidRequest(format!("Invalid API key: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_str(&config.api_version).map_err(|e| {
                ClaudeApiError::InvalidRequest(format!("Invalid API version: {e}"))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(ClaudeApiError::NetworkError)?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
            rate_limiter: TokenBucketRateLimiter::new(config.rate_limit_rps),
            scrubber: SecretScrubber::new(),
        })
    }

    /// Send a message to Claude and get a response
    #[instrument(skip(self, request), fields(model = %request.model, max_tokens = request.max_tokens))]
    pub async fn send_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ClaudeApiError> {
        self.rate_limiter.acquire().await;

        let url = format!("{}/v1/messages", self.base_url);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(request).send().await?;
        let result = self.handle_response(response).await;

        if let Ok(response) = &result {
            info!(
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                stop_reason = response.stop_reason.map_or("none", |r| r.as_str()),
                "message request succeeded"
            );
        }

        result
    }

    /// Handle HTTP response and convert to typed result
    async fn handle_response(&self, response: Response) -> Result<MessageResponse, ClaudeApiError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            let body = self.scrubber.scrub_message(&body);
            warn!("API error ({}): {}", status, body);
            return Err(ClaudeApiError::from_status(status, body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClaudeApiError::MalformedResponse(e.to_string()))
    }
}

//! Campaign HTTP server.
//!
//! Serves a single-page form and a JSON API. Every request gets its own run
//! and conversation; a failed run never takes the server down.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::page::INDEX_HTML;
use crate::domain::models::ServerConfig;
use crate::services::campaign_service::{CampaignResult, CampaignService, CampaignSummary};

/// Largest per-request step ceiling accepted from clients.
pub const MAX_REQUEST_STEPS: usize = 200;

/// Configuration for the campaign HTTP server.
#[derive(Debug, Clone)]
pub struct CampaignHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for CampaignHttpConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for CampaignHttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
        }
    }
}

/// Request to generate a campaign.
#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateRequest {
    pub request: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
    #[serde(default = "default_include_transcript")]
    pub include_transcript: bool,
}

const fn default_include_transcript() -> bool {
    true
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

struct AppState {
    service: CampaignService,
}

/// Campaign HTTP Server.
pub struct CampaignHttpServer {
    config: CampaignHttpConfig,
    service: CampaignService,
}

impl CampaignHttpServer {
    pub const fn new(service: CampaignService, config: CampaignHttpConfig) -> Self {
        Self { config, service }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState {
            service: self.service.clone(),
        });

        let app = Router::new()
            .route("/", get(index))
            .route("/api/v1/campaigns", post(generate_campaign))
            .route("/health", get(health_check))
            .with_state(state);

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.config.host, self.config.port).parse()
    }

    /// Start the server.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Campaign HTTP server listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn bad_request(error: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
            code: "INVALID_REQUEST".to_string(),
        }),
    )
}

async fn generate_campaign(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<CampaignSummary>), (StatusCode, Json<ErrorResponse>)> {
    if req.request.trim().is_empty() {
        return Err(bad_request("request must not be empty"));
    }

    if let Some(steps) = req.max_steps {
        if steps == 0 || steps > MAX_REQUEST_STEPS {
            return Err(bad_request(format!(
                "max_steps must be between 1 and {MAX_REQUEST_STEPS}"
            )));
        }
    }

    let run = state.service.generate_with_limit(&req.request, req.max_steps).await;
    let status = match run.result {
        CampaignResult::Failed { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };

    tracing::info!(
        run_id = %run.report.run_id,
        status = run.result.status(),
        steps = run.report.steps(),
        "campaign request served"
    );

    Ok((status, Json(run.summary(req.include_transcript))))
}

//! `serve`: run the HTTP front end until Ctrl-C.

use anyhow::{anyhow, Result};
use clap::Args;

use crate::adapters::http::{CampaignHttpConfig, CampaignHttpServer};
use crate::cli::service::build_campaign_service;
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to server.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Allow cross-origin requests
    #[arg(long)]
    pub cors: bool,
}

impl ServeArgs {
    /// Server settings with command-line overrides applied.
    pub fn http_config(&self, config: &Config) -> CampaignHttpConfig {
        let mut http = CampaignHttpConfig::from(&config.server);
        if let Some(host) = &self.host {
            http.host.clone_from(host);
        }
        if let Some(port) = self.port {
            http.port = port;
        }
        http.enable_cors |= self.cors;
        http
    }
}

pub async fn execute(args: ServeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_campaign_service(config)?;
    let http = args.http_config(config);
    let url = format!("http://{}:{}", http.host, http.port);

    if json_mode {
        println!("{}", serde_json::json!({ "status": "listening", "url": url }));
    } else {
        eprintln!("Campaign Crew listening on {} (Ctrl-C to stop)", console::style(&url).cyan());
    }

    CampaignHttpServer::new(service, http)
        .serve_with_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::warn!("failed to listen for Ctrl-C; server runs until killed");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutdown signal received");
        })
        .await
        .map_err(|e| anyhow!("HTTP server failed: {e}"))
}

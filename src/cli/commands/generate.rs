//! `generate`: run the crew once and report the outcome.

use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use std::process::ExitCode;

use crate::cli::output::progress::{create_spinner_with_message, hidden_spinner};
use crate::cli::output::{output, CommandOutput};
use crate::cli::service::build_campaign_service;
use crate::domain::models::Config;
use crate::services::campaign_service::{
    CampaignRun, CampaignService, CampaignSummary, DEFAULT_REQUEST,
};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Campaign request
    #[arg(default_value = DEFAULT_REQUEST)]
    pub request: String,

    /// Step ceiling for this run (defaults to workflow.max_steps)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub max_steps: Option<u32>,

    /// Print the full agent conversation
    #[arg(short, long)]
    pub transcript: bool,
}

/// Result of a generate run
#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    #[serde(flatten)]
    pub summary: CampaignSummary,
}

impl GenerateOutput {
    pub fn from_run(run: &CampaignRun, include_transcript: bool) -> Self {
        Self {
            summary: run.summary(include_transcript),
        }
    }
}

impl CommandOutput for GenerateOutput {
    fn to_human(&self) -> String {
        let summary = &self.summary;
        let mut lines = Vec::new();

        if let Some(transcript) = &summary.transcript {
            lines.push(style("Agent Conversation Transcript:").bold().to_string());
            for entry in transcript {
                lines.push(format!("{} {}", style(format!("{}:", entry.author)).cyan(), entry.content));
            }
            lines.push(String::new());
        }

        match (summary.status, summary.role) {
            ("proposal", Some(role)) => {
                lines.push(
                    style(format!("✓ Final Campaign Proposal ({role})"))
                        .green()
                        .bold()
                        .to_string(),
                );
                lines.push(String::new());
                lines.push(summary.message.clone());
            }
            ("failed", _) => {
                lines.push(style(format!("✗ {}", summary.message)).red().bold().to_string());
            }
            _ => {
                lines.push(style(format!("! {}", summary.message)).yellow().bold().to_string());
            }
        }

        lines.push(String::new());
        lines.push(
            style(format!(
                "{} step(s) in {:.1}s · run {}",
                summary.steps,
                summary.duration_ms as f64 / 1000.0,
                summary.run_id
            ))
            .dim()
            .to_string(),
        );

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: GenerateArgs, config: &Config, json_mode: bool) -> Result<ExitCode> {
    let service = build_campaign_service(config)?;

    let spinner = if json_mode {
        hidden_spinner()
    } else {
        create_spinner_with_message("Generating campaign...")
    };

    let run = run_request(&service, &args).await;
    spinner.finish_and_clear();
    let run = run?;

    output(&GenerateOutput::from_run(&run, args.transcript), json_mode);

    Ok(ExitCode::from(run.result.exit_code()))
}

/// Run the crew on the request exactly as given; blank requests are refused.
pub async fn run_request(service: &CampaignService, args: &GenerateArgs) -> Result<CampaignRun> {
    if args.request.trim().is_empty() {
        anyhow::bail!("Campaign request must not be empty");
    }

    Ok(service
        .generate_with_limit(&args.request, args.max_steps.map(|n| n as usize))
        .await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{ScriptedChatModel, ScriptedSearchTool};
    use crate::cli::service::campaign_service_with;
    use std::sync::Arc;

    async fn run_with(model: ScriptedChatModel) -> CampaignRun {
        let mut config = Config::default();
        config.retry.initial_backoff_ms = 1;
        config.retry.max_backoff_ms = 5;
        let service = campaign_service_with(
            &config,
            Arc::new(model),
            Arc::new(ScriptedSearchTool::empty()),
        );
        service.generate_with_limit("Launch a watch.", Some(3)).await
    }

    #[tokio::test]
    async fn test_proposal_output() {
        let run = run_with(ScriptedChatModel::always("FINAL ANSWER: Time for green.")).await;
        let out = GenerateOutput::from_run(&run, false);

        let human = out.to_human();
        assert!(human.contains("Final Campaign Proposal (ContentWriter)"));
        assert!(human.contains("Time for green."));

        let json = out.to_json();
        assert_eq!(json["status"], "proposal");
        assert_eq!(json["role"], "content-writer");
        assert_eq!(json["proposal"], "Time for green.");
        assert!(json.get("transcript").is_none());
    }

    #[tokio::test]
    async fn test_no_conclusion_output_with_transcript() {
        let run = run_with(ScriptedChatModel::chatter()).await;
        let out = GenerateOutput::from_run(&run, true);

        let human = out.to_human();
        assert!(human.contains("No final answer was generated within the conversation."));
        assert!(human.contains("Agent Conversation Transcript:"));

        let json = out.to_json();
        assert_eq!(json["status"], "no_conclusion");
        assert_eq!(json["steps"], 3);
        assert_eq!(json["transcript"].as_array().unwrap().len(), 4);
        assert_eq!(run.result.exit_code(), 2);
    }

    fn args(request: &str) -> GenerateArgs {
        GenerateArgs {
            request: request.to_string(),
            max_steps: Some(2),
            transcript: false,
        }
    }

    fn scripted_service(model: ScriptedChatModel) -> CampaignService {
        campaign_service_with(
            &Config::default(),
            Arc::new(model),
            Arc::new(ScriptedSearchTool::empty()),
        )
    }

    #[tokio::test]
    async fn test_request_seeds_conversation_verbatim() {
        let service = scripted_service(ScriptedChatModel::always("FINAL ANSWER: Go."));

        let run = run_request(&service, &args("  Launch a watch.\n"))
            .await
            .unwrap();

        assert_eq!(
            run.report.conversation.messages()[0].content(),
            "  Launch a watch.\n"
        );
    }

    #[tokio::test]
    async fn test_blank_request_is_refused() {
        let model = Arc::new(ScriptedChatModel::chatter());
        let service = campaign_service_with(
            &Config::default(),
            model.clone(),
            Arc::new(ScriptedSearchTool::empty()),
        );

        let err = run_request(&service, &args(" \t ")).await.unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
        assert_eq!(model.call_count(), 0);
    }
}

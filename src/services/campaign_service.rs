//! Front-end facing campaign generation.
//!
//! Wraps one engine run per request and maps its outcome to what a user
//! sees: a proposal, "no conclusion", or a provider failure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::ProviderError;
use crate::domain::models::{Author, RoleName, Route, RunOutcome, RunReport};
use crate::services::turn_router::TERMINATION_MARKER;
use crate::services::workflow_engine::WorkflowEngine;

/// Request used when the user does not supply one.
pub const DEFAULT_REQUEST: &str = "Create a campaign for an eco-friendly smartwatch.";

/// Shown when a run ends without any final answer.
pub const NO_CONCLUSION_MESSAGE: &str = "No final answer was generated within the conversation.";

/// User-visible result of a campaign request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignResult {
    /// A role gave a final answer
    Proposal { role: RoleName, text: String },
    /// The step ceiling was reached first
    NoConclusion { steps: usize },
    /// A provider call failed after retries
    Failed { role: RoleName, error: ProviderError },
}

impl CampaignResult {
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        match outcome {
            RunOutcome::Concluded { role, content } => Self::Proposal {
                role: *role,
                text: strip_marker(content),
            },
            RunOutcome::StepLimitReached { steps } => Self::NoConclusion { steps: *steps },
            RunOutcome::ProviderFailed { role, error } => Self::Failed {
                role: *role,
                error: error.clone(),
            },
        }
    }

    pub const fn status(&self) -> &'static str {
        match self {
            Self::Proposal { .. } => "proposal",
            Self::NoConclusion { .. } => "no_conclusion",
            Self::Failed { .. } => "failed",
        }
    }

    /// One-line message for display.
    pub fn message(&self) -> String {
        match self {
            Self::Proposal { text, .. } => text.clone(),
            Self::NoConclusion { .. } => NO_CONCLUSION_MESSAGE.to_string(),
            Self::Failed { role, error } => format!("{role} could not respond: {error}"),
        }
    }

    /// Process exit code for the CLI: 0 proposal, 2 no conclusion, 1 failure.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Proposal { .. } => 0,
            Self::NoConclusion { .. } => 2,
            Self::Failed { .. } => 1,
        }
    }
}

/// Proposal text from a concluding message.
///
/// Takes the text after the first marker, minus leading `:`/`-` and
/// whitespace. If nothing follows the marker, the text before it is used.
pub fn strip_marker(content: &str) -> String {
    let Some((before, after)) = content.split_once(TERMINATION_MARKER) else {
        return content.trim().to_string();
    };

    let after = after.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());
    let after = after.trim_end();
    if after.is_empty() {
        before.trim().to_string()
    } else {
        after.to_string()
    }
}

/// A finished request: the mapped result plus the full run record.
#[derive(Debug, Clone)]
pub struct CampaignRun {
    pub result: CampaignResult,
    pub report: RunReport,
}

/// One transcript line for output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleName>,
    pub content: String,
}

/// Serializable view of a finished request, shared by the CLI and HTTP API.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignSummary {
    pub run_id: Uuid,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    pub steps: usize,
    pub route: Vec<RouteEntry>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<TranscriptEntry>>,
}

/// Compact record of one step.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEntry {
    pub step: usize,
    pub role: RoleName,
    pub next: Option<RoleName>,
}

impl CampaignRun {
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.report
            .conversation
            .iter()
            .map(|message| TranscriptEntry {
                author: message.author().to_string(),
                role: match message.author() {
                    Author::User => None,
                    Author::Role(role) => Some(role),
                },
                content: message.content().to_string(),
            })
            .collect()
    }

    pub fn summary(&self, include_transcript: bool) -> CampaignSummary {
        let (role, proposal, error_code) = match &self.result {
            CampaignResult::Proposal { role, text } => (Some(*role), Some(text.clone()), None),
            CampaignResult::NoConclusion { .. } => (None, None, None),
            CampaignResult::Failed { role, error } => (Some(*role), None, Some(error.code())),
        };

        CampaignSummary {
            run_id: self.report.run_id,
            status: self.result.status(),
            role,
            proposal,
            message: self.result.message(),
            error_code,
            steps: self.report.steps(),
            route: self
                .report
                .transitions
                .iter()
                .map(|t| RouteEntry {
                    step: t.step,
                    role: t.role,
                    next: match t.route {
                        Route::Terminate => None,
                        Route::Next(next) => Some(next),
                    },
                })
                .collect(),
            started_at: self.report.started_at,
            duration_ms: self.report.duration_ms(),
            transcript: include_transcript.then(|| self.transcript()),
        }
    }
}

/// Entry point used by the CLI and the HTTP front end.
#[derive(Clone)]
pub struct CampaignService {
    engine: Arc<WorkflowEngine>,
}

impl CampaignService {
    pub const fn new(engine: Arc<WorkflowEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &WorkflowEngine {
        &self.engine
    }

    /// Run the crew on `request` with the configured step ceiling.
    pub async fn generate(&self, request: &str) -> CampaignRun {
        self.generate_with_limit(request, None).await
    }

    /// Run the crew on `request`, optionally overriding the step ceiling.
    pub async fn generate_with_limit(&self, request: &str, max_steps: Option<usize>) -> CampaignRun {
        let limit = max_steps.unwrap_or_else(|| self.engine.max_steps());
        let report = self.engine.run_with_limit(request, limit).await;
        CampaignRun {
            result: CampaignResult::from_outcome(&report.outcome),
            report,
        }
    }
}

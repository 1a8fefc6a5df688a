//! Run lifecycle: routing decisions, per-step records and the final report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::message::{Conversation, Message};
use super::role::RoleName;
use crate::domain::errors::ProviderError;

/// Where the workflow goes after a role has spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "role", rename_all = "snake_case")]
pub enum Route {
    /// A final answer was given; the run ends
    Terminate,
    /// Hand the turn to this role
    Next(RoleName),
}

/// Record of one engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// 1-based step number
    pub step: usize,
    /// Role invoked on this step
    pub role: RoleName,
    /// Decision taken after the role's message was appended
    pub route: Route,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A role emitted the termination marker
    Concluded {
        role: RoleName,
        /// Verbatim content of the concluding message
        content: String,
    },

    /// The step ceiling was hit without any final answer
    StepLimitReached { steps: usize },

    /// A provider call failed after its retry budget
    ProviderFailed { role: RoleName, error: ProviderError },
}

impl RunOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concluded { .. } => "concluded",
            Self::StepLimitReached { .. } => "no_conclusion",
            Self::ProviderFailed { .. } => "provider_failed",
        }
    }

    pub const fn is_concluded(&self) -> bool {
        matches!(self, Self::Concluded { .. })
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub outcome: RunOutcome,
    pub conversation: Conversation,
    pub transitions: Vec<Transition>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Number of role invocations that produced a message.
    pub fn steps(&self) -> usize {
        self.transitions.len()
    }

    /// Roles in the order they spoke.
    pub fn visited_roles(&self) -> Vec<RoleName> {
        self.transitions.iter().map(|t| t.role).collect()
    }

    /// The message that carried the termination marker, if the run concluded.
    pub fn final_message(&self) -> Option<&Message> {
        if self.outcome.is_concluded() {
            self.conversation.last()
        } else {
            None
        }
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

//! Round-robin workflow over the crew.
//!
//! Each run owns a fresh [`Conversation`] seeded with the user's request. The
//! engine invokes the current role with the whole conversation, appends its
//! single message, routes, and repeats until a role gives a final answer,
//! the step ceiling is reached, or a provider call fails for good.

use chrono::Utc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::models::{Conversation, RoleName, Route, RunOutcome, RunReport, Transition};
use crate::services::role_agent::Crew;
use crate::services::turn_router::route;

/// Default number of role invocations before a run gives up.
pub const DEFAULT_MAX_STEPS: usize = 50;

/// Drives runs over a shared, stateless crew.
///
/// Safe to share across tasks: runs never share conversation state.
pub struct WorkflowEngine {
    crew: Crew,
    max_steps: usize,
}

impl WorkflowEngine {
    pub const fn new(crew: Crew, max_steps: usize) -> Self {
        Self { crew, max_steps }
    }

    pub const fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub const fn crew(&self) -> &Crew {
        &self.crew
    }

    /// Run the crew on `request` with the configured step ceiling.
    pub async fn run(&self, request: &str) -> RunReport {
        self.run_with_limit(request, self.max_steps).await
    }

    /// Run the crew on `request`, allowing at most `max_steps` role invocations.
    pub async fn run_with_limit(&self, request: &str, max_steps: usize) -> RunReport {
        let run_id = Uuid::new_v4();
        let span = info_span!("campaign_run", %run_id, max_steps);

        async move {
            let started_at = Utc::now();
            let mut conversation = Conversation::seeded(request);
            let mut transitions: Vec<Transition> = Vec::new();
            let mut current = RoleName::INITIAL;

            info!("run started");

            let outcome = loop {
                if transitions.len() >= max_steps {
                    warn!(steps = transitions.len(), "step ceiling reached without a final answer");
                    break RunOutcome::StepLimitReached {
                        steps: transitions.len(),
                    };
                }

                let step = transitions.len() + 1;
                let agent = self.crew.agent(current);

                let reply = agent
                    .respond(&conversation)
                    .instrument(info_span!("step", step, role = %current))
                    .await;

                let message = match reply {
                    Ok(message) => message,
                    Err(error) => {
                        warn!(step, role = %current, error = %error, "role failed; ending run");
                        break RunOutcome::ProviderFailed {
                            role: current,
                            error,
                        };
                    }
                };

                let next = route(current, &message);
                let content = message.content().to_string();
                conversation.push(message);
                transitions.push(Transition {
                    step,
                    role: current,
                    route: next,
                });

                info!(step, role = %current, route = ?next, "step completed");

                match next {
                    Route::Terminate => {
                        break RunOutcome::Concluded {
                            role: current,
                            content,
                        };
                    }
                    Route::Next(role) => current = role,
                }
            };

            info!(outcome = outcome.as_str(), steps = transitions.len(), "run finished");

            RunReport {
                run_id,
                outcome,
                conversation,
                transitions,
                started_at,
                finished_at: Utc::now(),
            }
        }
        .instrument(span)
        .await
    }
}

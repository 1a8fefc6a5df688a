//! Integration tests for full campaign runs over scripted providers.

mod common;

use std::sync::Arc;

use campaign_crew::adapters::mock::{speaking_role, ScriptedChatModel, ScriptedSearchTool};
use campaign_crew::domain::errors::ProviderError;
use campaign_crew::domain::models::{Author, RoleName, Route, RunOutcome};
use campaign_crew::domain::ports::{ChatBlock, ChatRequest, ChatResponse};
use campaign_crew::services::{CampaignResult, DATA_SEARCH_TOOL, DEFAULT_MAX_STEPS};
use common::{engine_with, sample_hits, service_with, setup_test_logging};
use serde_json::json;

fn has_tool_result(request: &ChatRequest) -> bool {
    request
        .turns
        .iter()
        .flat_map(|turn| &turn.blocks)
        .any(|block| matches!(block, ChatBlock::ToolResult { .. }))
}

fn search_call(query: &str) -> ChatResponse {
    ChatResponse {
        blocks: vec![ChatBlock::ToolUse {
            id: "toolu_1".to_string(),
            name: DATA_SEARCH_TOOL.to_string(),
            input: json!({ "query": query }),
        }],
        stop_reason: Some("tool_use".to_string()),
    }
}

fn last_text(request: &ChatRequest) -> &str {
    request
        .turns
        .last()
        .and_then(|turn| turn.blocks.last())
        .map_or("", |block| match block {
            ChatBlock::Text { text } => text.as_str(),
            _ => "",
        })
}

/// Analyst searches once, brand manager concludes, everyone else drafts.
fn analyst_search_model() -> ScriptedChatModel {
    ScriptedChatModel::new(|role, request, _| match role {
        RoleName::DataAnalyst if has_tool_result(request) => {
            Ok(ChatResponse::text_only("Target 25-34 year olds."))
        }
        RoleName::DataAnalyst => Ok(search_call("eco smartwatch buyers")),
        RoleName::BrandManager => Ok(ChatResponse::text_only("FINAL ANSWER: Time for green.")),
        _ => Ok(ChatResponse::text_only("Draft idea.")),
    })
}

#[tokio::test]
async fn test_designer_final_answer_ends_run_after_two_steps() {
    setup_test_logging();
    let model = Arc::new(ScriptedChatModel::new(|role, _, _| {
        if role == RoleName::GraphicDesigner {
            Ok(ChatResponse::text_only("FINAL ANSWER Use neon colors."))
        } else {
            Ok(ChatResponse::text_only("Tagline: Time for green."))
        }
    }));
    let service = service_with(
        model.clone(),
        Arc::new(ScriptedSearchTool::empty()),
        DEFAULT_MAX_STEPS,
    );

    let run = service.generate("Launch a smartwatch.").await;

    assert_eq!(run.report.steps(), 2);
    assert_eq!(model.call_count(), 2);
    assert_eq!(
        run.report.visited_roles(),
        vec![RoleName::ContentWriter, RoleName::GraphicDesigner]
    );
    assert_eq!(
        run.result,
        CampaignResult::Proposal {
            role: RoleName::GraphicDesigner,
            text: "Use neon colors.".to_string()
        }
    );
}

#[tokio::test]
async fn test_no_marker_runs_to_ceiling() {
    let model = Arc::new(ScriptedChatModel::chatter());
    let service = service_with(
        model.clone(),
        Arc::new(ScriptedSearchTool::empty()),
        DEFAULT_MAX_STEPS,
    );

    let run = service.generate("Launch a smartwatch.").await;

    assert_eq!(run.report.outcome, RunOutcome::StepLimitReached { steps: 50 });
    assert_eq!(run.report.transitions.len(), 50);
    assert_eq!(run.report.conversation.len(), 51);
    assert_eq!(model.call_count(), 50);
    assert!(matches!(run.result, CampaignResult::NoConclusion { steps: 50 }));
    assert_eq!(
        run.result.message(),
        "No final answer was generated within the conversation."
    );
    assert!(run
        .report
        .transitions
        .iter()
        .all(|t| t.route == Route::Next(t.role.successor())));
}

#[tokio::test]
async fn test_roles_speak_in_fixed_cycle() {
    let model = Arc::new(ScriptedChatModel::chatter());
    let engine = engine_with(model, Arc::new(ScriptedSearchTool::empty()), 9);

    let report = engine.run("Launch a smartwatch.").await;

    let expected: Vec<RoleName> = RoleName::ALL.iter().copied().cycle().take(9).collect();
    assert_eq!(report.visited_roles(), expected);
    for (i, transition) in report.transitions.iter().enumerate() {
        assert_eq!(transition.step, i + 1);
    }
}

#[tokio::test]
async fn test_conversation_grows_by_one_message_per_step() {
    let model = Arc::new(ScriptedChatModel::chatter());
    let engine = engine_with(model.clone(), Arc::new(ScriptedSearchTool::empty()), 8);

    let report = engine.run("Launch a smartwatch.").await;

    let messages = report.conversation.messages();
    assert_eq!(messages[0].author(), Author::User);
    assert_eq!(messages[0].content(), "Launch a smartwatch.");
    for (i, message) in messages.iter().skip(1).enumerate() {
        assert_eq!(message.role(), Some(report.transitions[i].role));
        assert!(message.content().ends_with(&format!("contribution #{}", i + 1)));
    }

    // Every call after the first sees the previous step's message last.
    let requests = model.requests();
    assert_eq!(last_text(&requests[0]), "Launch a smartwatch.");
    for (k, request) in requests.iter().enumerate().skip(1) {
        assert!(
            last_text(request).ends_with(&format!("contribution #{k}")),
            "call {k} did not see the latest message"
        );
    }

    // The writer's second turn replays its first message as its own.
    let writer_again = &requests[4];
    assert_eq!(speaking_role(writer_again), RoleName::ContentWriter);
    assert!(writer_again.turns.iter().any(|turn| {
        turn.role == campaign_crew::domain::ports::ChatRole::Assistant
            && matches!(turn.blocks.first(), Some(ChatBlock::Text { text }) if text == "ContentWriter contribution #1")
    }));
}

#[tokio::test]
async fn test_transient_search_failures_are_retried() {
    setup_test_logging();
    let model = Arc::new(analyst_search_model());
    let search = Arc::new(
        ScriptedSearchTool::new(sample_hits())
            .failing_first(2, ProviderError::Server("503".to_string())),
    );
    let service = service_with(model, search.clone(), DEFAULT_MAX_STEPS);

    let run = service.generate("Launch a smartwatch.").await;

    assert_eq!(search.call_count(), 3);
    assert_eq!(search.queries()[0], "eco smartwatch buyers");
    assert_eq!(run.report.steps(), 4);
    assert_eq!(
        run.report.conversation.messages()[3].content(),
        "Target 25-34 year olds."
    );
    assert_eq!(
        run.result,
        CampaignResult::Proposal {
            role: RoleName::BrandManager,
            text: "Time for green.".to_string()
        }
    );
}

#[tokio::test]
async fn test_search_failure_beyond_budget_ends_run() {
    let model = Arc::new(analyst_search_model());
    let search = Arc::new(
        ScriptedSearchTool::new(sample_hits())
            .failing_first(3, ProviderError::Timeout("search".to_string())),
    );
    let service = service_with(model.clone(), search.clone(), DEFAULT_MAX_STEPS);

    let run = service.generate("Launch a smartwatch.").await;

    assert_eq!(search.call_count(), 3);
    assert!(matches!(
        &run.report.outcome,
        RunOutcome::ProviderFailed {
            role: RoleName::DataAnalyst,
            error: ProviderError::Timeout(_)
        }
    ));
    assert_eq!(run.report.steps(), 2);
    assert_eq!(run.report.conversation.len(), 3);
    assert!(model
        .requests()
        .iter()
        .all(|r| speaking_role(r) != RoleName::BrandManager));
    assert_eq!(run.result.exit_code(), 1);

    let summary = run.summary(false);
    assert_eq!(summary.status, "failed");
    assert_eq!(summary.error_code, Some("TIMEOUT"));
    assert!(summary.transcript.is_none());
}

#[tokio::test]
async fn test_empty_reply_is_retried_then_accepted() {
    let model = Arc::new(ScriptedChatModel::new(|_, _, call| match call {
        0 => Ok(ChatResponse::text_only("   ")),
        _ => Ok(ChatResponse::text_only("FINAL ANSWER: Second try.")),
    }));
    let engine = engine_with(model.clone(), Arc::new(ScriptedSearchTool::empty()), 5);

    let report = engine.run("Launch a smartwatch.").await;

    assert_eq!(model.call_count(), 2);
    assert!(matches!(
        report.outcome,
        RunOutcome::Concluded {
            role: RoleName::ContentWriter,
            ..
        }
    ));
}

#[tokio::test]
async fn test_concurrent_runs_do_not_share_conversations() {
    let model = Arc::new(ScriptedChatModel::new(|_, request, _| {
        let topic = match request.turns.first().and_then(|t| t.blocks.first()) {
            Some(ChatBlock::Text { text }) => text.clone(),
            _ => String::new(),
        };
        Ok(ChatResponse::text_only(format!("FINAL ANSWER: {topic}")))
    }));
    let service = service_with(model, Arc::new(ScriptedSearchTool::empty()), 5);

    let requests = ["Watch", "Shoes", "Coffee", "Bikes"];
    let runs = futures::future::join_all(requests.iter().map(|r| service.generate(r))).await;

    let mut ids = std::collections::HashSet::new();
    for (request, run) in requests.iter().zip(&runs) {
        assert_eq!(run.report.conversation.len(), 2);
        assert_eq!(run.result.message(), *request);
        assert!(ids.insert(run.report.run_id));
    }
}

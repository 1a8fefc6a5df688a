//! Scripted providers for tests and offline runs.
//!
//! `ScriptedChatModel` answers through a closure that sees the speaking role,
//! the request and a global call index. `ScriptedSearchTool` returns fixed
//! hits and can fail a set number of times first.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::errors::ProviderError;
use crate::domain::models::RoleName;
use crate::domain::ports::{
    ChatBlock, ChatModel, ChatRequest, ChatResponse, SearchHit, SearchTool,
};
use crate::services::prompt_builder::role_description;

type Responder =
    dyn Fn(RoleName, &ChatRequest, usize) -> Result<ChatResponse, ProviderError> + Send + Sync;

/// Role whose system prompt `request` carries.
///
/// Unrecognized prompts are attributed to the initial role.
pub fn speaking_role(request: &ChatRequest) -> RoleName {
    RoleName::ALL
        .into_iter()
        .find(|role| request.system.ends_with(role_description(*role)))
        .unwrap_or(RoleName::INITIAL)
}

/// Chat model driven by a closure.
pub struct ScriptedChatModel {
    responder: Box<Responder>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChatModel {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(RoleName, &ChatRequest, usize) -> Result<ChatResponse, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call returns `text`.
    pub fn always(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_, _, _| Ok(ChatResponse::text_only(text.clone())))
    }

    /// Every call fails with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::new(move |_, _, _| Err(error.clone()))
    }

    /// Each role answers with a numbered contribution and never concludes.
    pub fn chatter() -> Self {
        Self::new(|role, _, call| {
            Ok(ChatResponse::text_only(format!(
                "{} contribution #{}",
                role.display_name(),
                call + 1
            )))
        })
    }

    /// First call asks for one DataSearch; later calls answer with `answer`.
    pub fn searching_once(query: impl Into<String>, answer: impl Into<String>) -> Self {
        let query = query.into();
        let answer = answer.into();
        Self::new(move |_, _, call| {
            if call == 0 {
                Ok(ChatResponse {
                    blocks: vec![ChatBlock::ToolUse {
                        id: "toolu_scripted".to_string(),
                        name: "DataSearch".to_string(),
                        input: json!({ "query": query }),
                    }],
                    stop_reason: Some("tool_use".to_string()),
                })
            } else {
                Ok(ChatResponse::text_only(answer.clone()))
            }
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        (self.responder)(speaking_role(request), request, call)
    }
}

/// Search tool returning fixed hits.
pub struct ScriptedSearchTool {
    hits: Vec<SearchHit>,
    failures_remaining: AtomicU32,
    failure: ProviderError,
    queries: Mutex<Vec<String>>,
}

impl ScriptedSearchTool {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            failures_remaining: AtomicU32::new(0),
            failure: ProviderError::Server("scripted search failure".to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Fail the first `times` calls with `error`, then succeed.
    #[must_use]
    pub fn failing_first(mut self, times: u32, error: ProviderError) -> Self {
        self.failures_remaining = AtomicU32::new(times);
        self.failure = error;
        self
    }

    pub fn call_count(&self) -> usize {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Every query received, including failed attempts.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SearchTool for ScriptedSearchTool {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_string());

        let failed = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(self.failure.clone());
        }

        Ok(self.hits.clone())
    }
}

//! Mock provider implementation for testing.

use super::{FinishReason, ProviderError, ProviderResponse, SummaryProvider};
use crate::models::ChatMessage;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum MockBehavior {
    Reply(String),
    Fail(String),
}

/// Mock provider that answers with a fixed summary or a fixed failure.
pub struct MockSummaryProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_messages: Mutex<Option<Vec<ChatMessage>>>,
}

impl MockSummaryProvider {
    /// Always succeeds with `summary`.
    pub fn replying(summary: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Reply(summary.into()))
    }

    /// Always fails with an API error carrying `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fail(reason.into()))
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
        }
    }

    /// Number of `complete` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt passed to the most recent call.
    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.last_messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl SummaryProvider for MockSummaryProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_messages.lock() {
            *guard = Some(messages.to_vec());
        }

        match &self.behavior {
            MockBehavior::Reply(summary) => Ok(ProviderResponse {
                text: summary.clone(),
                raw: serde_json::json!({
                    "id": "mock-completion",
                    "model": model,
                    "choices": [{
                        "index": 0,
                        "message": { "role": "assistant", "content": summary },
                        "finish_reason": "stop"
                    }]
                }),
                input_tokens: messages.iter().map(|m| m.content.len() as u32 / 4).sum(),
                output_tokens: summary.len() as u32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            MockBehavior::Fail(reason) => Err(ProviderError::ApiError(reason.clone())),
        }
    }
}

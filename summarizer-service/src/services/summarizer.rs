//! Summarization pipeline: validate, build prompt, call upstream once, log.

use crate::models::{ChatMessage, SummarizeRequest, SummarizeResult};
use crate::services::artifacts::{ArtifactKind, ArtifactLog};
use crate::services::metrics;
use crate::services::providers::SummaryProvider;
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

pub const SYSTEM_PROMPT: &str = "You are a professional assistant who writes summaries for \
stakeholders who were not present. Respond with a concise, professional summary written as \
plain prose paragraphs. Do not use bullet points, headings or lists, and do not add any \
commentary before or after the summary.";

pub const USER_PROMPT_PREFIX: &str = "Summarize the following text:";

pub const EMPTY_INPUT_REASON: &str = "inputText must not be empty";

/// Fixed two-turn prompt: system persona first, then the user text.
pub fn build_prompt(input: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("{}\n\n{}", USER_PROMPT_PREFIX, input)),
    ]
}

#[derive(Clone)]
pub struct Summarizer {
    provider: Arc<dyn SummaryProvider>,
    model: String,
    artifacts: ArtifactLog,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn SummaryProvider>, model: String, artifacts: ArtifactLog) -> Self {
        Self {
            provider,
            model,
            artifacts,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    #[tracing::instrument(skip(self, request), fields(input_len = request.input_text.len()))]
    pub async fn summarize(&self, request_id: &str, request: &SummarizeRequest) -> SummarizeResult {
        let result = self.run(request_id, request).await;
        metrics::record_summarize_request(result.outcome());
        result
    }

    async fn run(&self, request_id: &str, request: &SummarizeRequest) -> SummarizeResult {
        let stamp = ArtifactLog::stamp(Utc::now());
        let input = request.input_text.trim();

        if input.is_empty() {
            tracing::warn!(request_id = %request_id, "Rejected summarization request with empty input");
            self.artifacts
                .write(
                    ArtifactKind::Error,
                    &stamp,
                    &json!({
                        "timestamp": now_iso(),
                        "request": { "inputText": request.input_text },
                        "error": EMPTY_INPUT_REASON,
                    }),
                )
                .await;
            return SummarizeResult::ValidationError {
                reason: EMPTY_INPUT_REASON.to_string(),
            };
        }

        let messages = build_prompt(input);
        let request_payload = json!({
            "timestamp": now_iso(),
            "inputLength": input.len(),
            "messages": messages,
            "model": self.model,
        });
        self.artifacts
            .write(ArtifactKind::Request, &stamp, &request_payload)
            .await;

        tracing::info!(
            request_id = %request_id,
            provider = self.provider.name(),
            model = %self.model,
            input_len = input.len(),
            "Sending summarization request upstream"
        );

        let started = Instant::now();
        let outcome = self.provider.complete(&self.model, &messages).await;
        metrics::record_provider_latency(
            self.provider.name(),
            &self.model,
            started.elapsed().as_secs_f64(),
        );

        match outcome {
            Ok(response) => {
                metrics::record_tokens(&self.model, response.input_tokens, response.output_tokens);
                tracing::info!(
                    request_id = %request_id,
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    finish_reason = ?response.finish_reason,
                    "Summarization completed"
                );

                self.artifacts
                    .write(
                        ArtifactKind::Response,
                        &stamp,
                        &json!({
                            "timestamp": now_iso(),
                            "response": response.raw,
                            "model": self.model,
                        }),
                    )
                    .await;

                SummarizeResult::Success {
                    summary: response.text,
                }
            }
            Err(e) => {
                metrics::record_provider_error(self.provider.name(), e.error_type());
                tracing::error!(
                    request_id = %request_id,
                    error = %e,
                    "Summarization request failed upstream"
                );

                self.artifacts
                    .write(
                        ArtifactKind::Error,
                        &stamp,
                        &json!({
                            "timestamp": now_iso(),
                            "request": request_payload,
                            "error": e.to_string(),
                        }),
                    )
                    .await;

                SummarizeResult::UpstreamError {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::providers::mock::MockSummaryProvider;

    fn summarizer(provider: Arc<MockSummaryProvider>) -> Summarizer {
        Summarizer::new(provider, "gpt-4o-mini".to_string(), ArtifactLog::disabled())
    }

    fn request(text: &str) -> SummarizeRequest {
        SummarizeRequest {
            input_text: text.to_string(),
        }
    }

    #[test]
    fn prompt_is_system_then_user() {
        let messages = build_prompt("Quarterly revenue rose 12%.");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "Summarize the following text:\n\nQuarterly revenue rose 12%."
        );
    }

    #[tokio::test]
    async fn blank_input_never_reaches_provider() {
        let provider = Arc::new(MockSummaryProvider::replying("unused"));
        let s = summarizer(provider.clone());

        for text in ["", "   ", "\n\t"] {
            let result = s.summarize("req-1", &request(text)).await;
            assert_eq!(
                result,
                SummarizeResult::ValidationError {
                    reason: EMPTY_INPUT_REASON.to_string()
                }
            );
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn input_is_trimmed_before_prompting() {
        let provider = Arc::new(MockSummaryProvider::replying("Revenue grew."));
        let s = summarizer(provider.clone());

        let result = s
            .summarize("req-2", &request("  Quarterly revenue rose 12%.\n"))
            .await;

        assert_eq!(
            result,
            SummarizeResult::Success {
                summary: "Revenue grew.".to_string()
            }
        );
        assert_eq!(provider.calls(), 1);
        let sent = provider.last_messages().unwrap();
        assert!(sent[1].content.ends_with("\n\nQuarterly revenue rose 12%."));
    }

    #[tokio::test]
    async fn provider_failure_is_an_upstream_error() {
        let provider = Arc::new(MockSummaryProvider::failing("model overloaded"));
        let s = summarizer(provider.clone());

        let result = s.summarize("req-3", &request("Some text")).await;

        match result {
            SummarizeResult::UpstreamError { reason } => {
                assert!(reason.contains("model overloaded"))
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
        assert_eq!(provider.calls(), 1);
    }
}

//! Upstream LLM provider abstractions and implementations.
//!
//! The summarizer talks to the language model through the `SummaryProvider`
//! trait so handlers branch on a `Result` instead of on transport details.
//! The OpenAI-compatible chat completions client is the production
//! implementation; the mock backs tests.

pub mod mock;
pub mod openai;

use crate::models::ChatMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Short label for the `provider_errors_total` metric.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

impl FinishReason {
    pub fn from_api(reason: Option<&str>) -> Self {
        match reason {
            Some("stop") | None => FinishReason::Complete,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(_) => FinishReason::Other,
        }
    }
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text.
    pub text: String,

    /// Upstream response body as received, kept for response artifacts.
    pub raw: serde_json::Value,

    /// Input tokens consumed.
    pub input_tokens: u32,

    /// Output tokens generated.
    pub output_tokens: u32,

    pub finish_reason: FinishReason,
}

/// Chat completion provider.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Provider name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Run one chat completion. Never retried by callers.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<ProviderResponse, ProviderError>;
}

//! OpenAI-compatible chat completions provider.
//!
//! Works against api.openai.com and any server exposing the same
//! `/chat/completions` contract (Azure proxies, local gateways).

use super::{FinishReason, ProviderError, ProviderResponse, SummaryProvider};
use crate::models::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client-side request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

/// OpenAI chat completions provider.
pub struct OpenAiProvider {
    config: OpenAiProviderConfig,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SummaryProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<ProviderResponse, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::NotConfigured("OpenAI API key not configured".into()))?;

        let request = ChatCompletionRequest { model, messages };

        tracing::debug!(
            model = %model,
            message_count = messages.len(),
            "Sending request to chat completions API"
        );

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Chat completions API error {}: {}",
                status, error_text
            )));
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let parsed: ChatCompletionResponse = serde_json::from_value(raw.clone())
            .map_err(|e| ProviderError::InvalidResponse(format!("Unexpected response shape: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("Response contained no choices".into()))?;

        let finish_reason = FinishReason::from_api(choice.finish_reason.as_deref());
        if finish_reason == FinishReason::ContentFilter {
            return Err(ProviderError::ContentFiltered);
        }

        let text = choice
            .message
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse("Response message was empty".into()))?;

        let usage = parsed.usage.unwrap_or_default();

        Ok(ProviderResponse {
            text,
            raw,
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            finish_reason,
        })
    }
}

// API request/response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

use serde::{Deserialize, Serialize};

/// Body of `POST /summarize`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummarizeRequest {
    #[serde(rename = "inputText")]
    pub input_text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a chat completion prompt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Outcome of a single summarization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeResult {
    Success { summary: String },
    ValidationError { reason: String },
    UpstreamError { reason: String },
}

impl SummarizeResult {
    /// Label used for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            SummarizeResult::Success { .. } => "success",
            SummarizeResult::ValidationError { .. } => "validation_error",
            SummarizeResult::UpstreamError { .. } => "upstream_error",
        }
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClientLogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl ClientLogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientLogLevel::Debug => "DEBUG",
            ClientLogLevel::Info => "INFO",
            ClientLogLevel::Warn => "WARN",
            ClientLogLevel::Error => "ERROR",
            ClientLogLevel::Critical => "CRITICAL",
        }
    }
}

/// Console output shipped by the browser front-end.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientLog {
    pub level: ClientLogLevel,
    #[validate(length(min = 1, max = 8192, message = "message must be 1-8192 characters"))]
    pub message: String,
    #[validate(length(max = 64))]
    pub timestamp: String,
    #[serde(default)]
    #[validate(length(max = 512))]
    pub user_agent: String,
}

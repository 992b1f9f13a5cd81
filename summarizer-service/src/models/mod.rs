//! Domain models for the summarizer service.

pub mod client_log;
pub mod health;
pub mod summary;

pub use client_log::{ClientLog, ClientLogLevel};
pub use health::{HealthReport, HealthStatus};
pub use summary::{ChatMessage, Role, SummarizeRequest, SummarizeResult, SummaryResponse};

//! HTTP handlers for the summarizer service.

pub mod client_log;
pub mod health;
pub mod metrics;
pub mod summarize;

pub use client_log::client_log;
pub use health::healthcheck;
pub use metrics::metrics_handler;
pub use summarize::summarize;

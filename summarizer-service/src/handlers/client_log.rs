use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use service_core::error::AppError;
use validator::Validate;

use crate::models::{ClientLog, ClientLogLevel};
use crate::services::metrics;

/// Re-emits browser console output through the server's log pipeline.
pub async fn client_log(
    payload: Result<Json<ClientLog>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(log) = payload.map_err(|rejection| {
        AppError::UnprocessableEntity(anyhow::anyhow!(rejection.body_text()))
    })?;
    log.validate()?;

    metrics::record_client_log(log.level.as_str());

    match log.level {
        ClientLogLevel::Debug => tracing::debug!(
            target: "client",
            user_agent = %log.user_agent,
            client_timestamp = %log.timestamp,
            "{}",
            log.message
        ),
        ClientLogLevel::Info => tracing::info!(
            target: "client",
            user_agent = %log.user_agent,
            client_timestamp = %log.timestamp,
            "{}",
            log.message
        ),
        ClientLogLevel::Warn => tracing::warn!(
            target: "client",
            user_agent = %log.user_agent,
            client_timestamp = %log.timestamp,
            "{}",
            log.message
        ),
        ClientLogLevel::Error | ClientLogLevel::Critical => tracing::error!(
            target: "client",
            user_agent = %log.user_agent,
            client_timestamp = %log.timestamp,
            client_level = log.level.as_str(),
            "{}",
            log.message
        ),
    }

    Ok(StatusCode::NO_CONTENT)
}

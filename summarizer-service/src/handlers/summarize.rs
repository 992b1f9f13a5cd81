use axum::{extract::rejection::JsonRejection, extract::State, http::HeaderMap, Json};
use service_core::error::AppError;
use service_core::middleware::REQUEST_ID_HEADER;

use crate::models::{SummarizeRequest, SummarizeResult, SummaryResponse};
use crate::startup::AppState;

/// Any body that does not parse as `{"inputText": string}` is a 400, the same
/// as empty input.
#[tracing::instrument(skip(state, headers, payload))]
pub async fn summarize(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, AppError> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    let Json(request) = payload.inspect_err(|rejection| {
        tracing::warn!(
            request_id = %request_id,
            status = %rejection.status(),
            "Rejected malformed summarization request"
        );
    })?;

    match state.summarizer.summarize(request_id, &request).await {
        SummarizeResult::Success { summary } => Ok(Json(SummaryResponse { summary })),
        SummarizeResult::ValidationError { reason } => {
            Err(AppError::BadRequest(anyhow::anyhow!(reason)))
        }
        SummarizeResult::UpstreamError { reason } => Err(AppError::UpstreamError(reason)),
    }
}

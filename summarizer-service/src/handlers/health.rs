use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::startup::AppState;

/// Readiness report. 503 still carries the full report body.
pub async fn healthcheck(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.health.check();
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}

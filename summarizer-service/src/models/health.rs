use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Point-in-time readiness report served by `/healthcheck`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    /// ISO-8601, second precision, UTC.
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub app_version: String,
    pub app_environment: String,
    pub api_key_present: bool,
    pub disk_free_bytes: u64,
    /// Failure reasons joined with ", ". Serialized as `null` when healthy.
    pub message: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

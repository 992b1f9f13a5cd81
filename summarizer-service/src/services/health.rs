//! Readiness computation behind `/healthcheck`.
//!
//! Three checks feed the report: free disk space on the configured volume,
//! presence of the upstream API credential, and process uptime. Disk is
//! checked before the credential so failure reasons keep that order.

use crate::config::{SummarizerConfig, API_KEY_ENV};
use crate::models::{HealthReport, HealthStatus};
use crate::services::metrics;
use chrono::{DateTime, SecondsFormat, Utc};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DISK_READ_ERROR: &str = "Critical: Hard disk read error.";
pub const DISK_LOW_SPACE: &str = "Critical: Insufficient storage space on disk.";

fn api_key_missing_reason() -> String {
    format!("Critical: {} missing.", API_KEY_ENV)
}

/// Source of free-space readings.
pub trait DiskProbe: Send + Sync {
    fn available_bytes(&self) -> io::Result<u64>;
}

/// Reads free space of the volume holding `path`.
pub struct FsDiskProbe {
    path: PathBuf,
}

impl FsDiskProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DiskProbe for FsDiskProbe {
    fn available_bytes(&self) -> io::Result<u64> {
        fs2::available_space(&self.path)
    }
}

#[derive(Clone)]
pub struct HealthMonitor {
    app_version: String,
    app_environment: String,
    api_key_present: bool,
    min_free_bytes: u64,
    started_at: Instant,
    disk: Arc<dyn DiskProbe>,
}

impl HealthMonitor {
    pub fn new(config: &SummarizerConfig, started_at: Instant, disk: Arc<dyn DiskProbe>) -> Self {
        Self {
            app_version: config.app.version.clone(),
            app_environment: config.app.environment.clone(),
            api_key_present: config.openai.has_api_key(),
            min_free_bytes: config.health.min_free_bytes,
            started_at,
            disk,
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Build a fresh report. Never fails; probe errors degrade the status.
    pub fn check(&self) -> HealthReport {
        let report = self.evaluate(Utc::now(), self.uptime());
        metrics::set_health_status(report.is_healthy());

        if !report.is_healthy() {
            tracing::warn!(
                disk_free_bytes = report.disk_free_bytes,
                api_key_present = report.api_key_present,
                reasons = report.message.as_deref().unwrap_or_default(),
                "Health check failed"
            );
        }

        report
    }

    fn evaluate(&self, now: DateTime<Utc>, uptime: Duration) -> HealthReport {
        let mut fail_reasons: Vec<String> = Vec::new();

        let disk_free_bytes = match self.disk.available_bytes() {
            Ok(free) => {
                if free < self.min_free_bytes {
                    fail_reasons.push(DISK_LOW_SPACE.to_string());
                }
                free
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read free disk space");
                fail_reasons.push(DISK_READ_ERROR.to_string());
                0
            }
        };

        if !self.api_key_present {
            fail_reasons.push(api_key_missing_reason());
        }

        let status = if fail_reasons.is_empty() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        HealthReport {
            status,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, false),
            uptime_seconds: uptime.as_secs(),
            app_version: self.app_version.clone(),
            app_environment: self.app_environment.clone(),
            api_key_present: self.api_key_present,
            disk_free_bytes,
            message: if fail_reasons.is_empty() {
                None
            } else {
                Some(fail_reasons.join(", "))
            },
        }
    }
}

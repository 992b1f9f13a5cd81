//! Prometheus metrics for summarizer-service.
//!
//! Provides request outcome, upstream and health metrics.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static SUMMARIZE_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static CLIENT_LOGS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static HEALTH_STATUS: OnceLock<IntGauge> = OnceLock::new();

/// Initialize all metrics. Safe to call more than once; later calls are no-ops.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    let registry = Registry::new();

    let summarize_requests = IntCounterVec::new(
        Opts::new("summarize_requests_total", "Total summarization requests"),
        &["outcome"], // success, validation_error, upstream_error
    )
    .expect("Failed to create summarize_requests_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "provider_latency_seconds",
            "Upstream LLM API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    )
    .expect("Failed to create provider_latency_seconds metric");

    let provider_errors = IntCounterVec::new(
        Opts::new("provider_errors_total", "Total upstream LLM API errors"),
        &["provider", "error_type"],
    )
    .expect("Failed to create provider_errors_total metric");

    let tokens = IntCounterVec::new(
        Opts::new("tokens_total", "Total tokens processed"),
        &["model", "type"], // type: input, output
    )
    .expect("Failed to create tokens_total metric");

    let client_logs = IntCounterVec::new(
        Opts::new("client_logs_total", "Client log messages received"),
        &["level"],
    )
    .expect("Failed to create client_logs_total metric");

    let health_status = IntGauge::new(
        "health_status",
        "Result of the last health check (1 healthy, 0 unhealthy)",
    )
    .expect("Failed to create health_status metric");

    registry
        .register(Box::new(summarize_requests.clone()))
        .expect("Failed to register summarize_requests_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register provider_latency_seconds");
    registry
        .register(Box::new(provider_errors.clone()))
        .expect("Failed to register provider_errors_total");
    registry
        .register(Box::new(tokens.clone()))
        .expect("Failed to register tokens_total");
    registry
        .register(Box::new(client_logs.clone()))
        .expect("Failed to register client_logs_total");
    registry
        .register(Box::new(health_status.clone()))
        .expect("Failed to register health_status");

    // Initialize globals
    if REGISTRY.set(registry).is_err() {
        // Lost an initialization race; the winner's collectors are in use.
        return;
    }
    let _ = SUMMARIZE_REQUESTS_TOTAL.set(summarize_requests);
    let _ = PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = PROVIDER_ERRORS_TOTAL.set(provider_errors);
    let _ = TOKENS_TOTAL.set(tokens);
    let _ = CLIENT_LOGS_TOTAL.set(client_logs);
    let _ = HEALTH_STATUS.set(health_status);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record the outcome of a summarization request.
pub fn record_summarize_request(outcome: &str) {
    if let Some(counter) = SUMMARIZE_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}

/// Record token usage for a completed upstream call.
pub fn record_tokens(model: &str, input_tokens: u32, output_tokens: u32) {
    if let Some(counter) = TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[model, "input"])
            .inc_by(input_tokens as u64);
        counter
            .with_label_values(&[model, "output"])
            .inc_by(output_tokens as u64);
    }
}

/// Record a received client log line.
pub fn record_client_log(level: &str) {
    if let Some(counter) = CLIENT_LOGS_TOTAL.get() {
        counter.with_label_values(&[level]).inc();
    }
}

/// Record the result of the latest health check.
pub fn set_health_status(healthy: bool) {
    if let Some(gauge) = HEALTH_STATUS.get() {
        gauge.set(if healthy { 1 } else { 0 });
    }
}

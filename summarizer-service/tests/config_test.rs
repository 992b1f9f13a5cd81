//! Configuration loading reads process environment, so everything runs in a
//! single test to avoid races between test threads.

use service_core::error::AppError;
use summarizer_service::config::{SummarizerConfig, DEFAULT_MIN_FREE_DISK_BYTES};

#[test]
fn load_requires_version_and_environment() {
    std::env::remove_var("APP_VERSION");
    std::env::set_var("APP_ENVIRONMENT", "dev");
    std::env::remove_var("OPENAI_MODEL");
    std::env::remove_var("HEALTH_MIN_FREE_BYTES");

    let err = SummarizerConfig::load().unwrap_err();
    assert!(matches!(err, AppError::ConfigError(_)));
    assert!(err.to_string().contains("APP_VERSION"));

    std::env::set_var("APP_VERSION", "2.0.0");
    std::env::remove_var("APP_ENVIRONMENT");
    let err = SummarizerConfig::load().unwrap_err();
    assert!(err.to_string().contains("APP_ENVIRONMENT"));

    std::env::set_var("APP_ENVIRONMENT", "dev");
    std::env::set_var("OPENAI_APIKEY", "sk-from-env");
    let config = SummarizerConfig::load().expect("config should load");
    assert_eq!(config.app.version, "2.0.0");
    assert_eq!(config.app.environment, "dev");
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-from-env"));
    assert_eq!(config.health.min_free_bytes, DEFAULT_MIN_FREE_DISK_BYTES);

    // Production must name its model explicitly.
    std::env::set_var("APP_ENVIRONMENT", "prod");
    let err = SummarizerConfig::load().unwrap_err();
    assert!(err.to_string().contains("OPENAI_MODEL"));

    std::env::set_var("OPENAI_MODEL", "gpt-4o");
    let config = SummarizerConfig::load().expect("prod config should load");
    assert_eq!(config.openai.model, "gpt-4o");
}

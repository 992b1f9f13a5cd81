use service_core::observability::init_tracing;
use summarizer_service::config::SummarizerConfig;
use summarizer_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // Configuration may be missing entirely; log level falls back to info.
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_tracing("summarizer-service", &log_level);

    let config = SummarizerConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    tracing::info!(
        version = %config.app.version,
        environment = %config.app.environment,
        cors_origin = %config.cors.allowed_origin,
        "Loaded configuration"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}

//! Application startup and lifecycle management.

use crate::config::SummarizerConfig;
use crate::handlers;
use crate::services::providers::openai::{OpenAiProvider, OpenAiProviderConfig};
use crate::services::{
    init_metrics, ArtifactLog, DiskProbe, FsDiskProbe, HealthMonitor, SummaryProvider, Summarizer,
};
use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state. Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: SummarizerConfig,
    pub health: HealthMonitor,
    pub summarizer: Summarizer,
}

impl AppState {
    pub fn new(config: SummarizerConfig, provider: Arc<dyn SummaryProvider>) -> Self {
        let disk: Arc<dyn DiskProbe> = Arc::new(FsDiskProbe::new(&config.health.disk_path));
        Self::with_disk_probe(config, provider, disk)
    }

    pub fn with_disk_probe(
        config: SummarizerConfig,
        provider: Arc<dyn SummaryProvider>,
        disk: Arc<dyn DiskProbe>,
    ) -> Self {
        let health = HealthMonitor::new(&config, Instant::now(), disk);
        let summarizer = Summarizer::new(
            provider,
            config.openai.model.clone(),
            ArtifactLog::new(&config.artifacts),
        );

        Self {
            config,
            health,
            summarizer,
        }
    }
}

/// CORS for the single configured front-end origin, with credentials.
/// Other origins get no `access-control-allow-origin` header.
fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, AppError> {
    let origin = allowed_origin.parse::<HeaderValue>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Invalid CORS origin '{}': {}",
            allowed_origin,
            e
        ))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let cors = cors_layer(&state.config.cors.allowed_origin)?;

    let app = Router::new()
        .route("/healthcheck", get(handlers::healthcheck))
        .route("/summarize", post(handlers::summarize))
        .route("/log/client", post(handlers::client_log))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(cors)
        // Outermost, so preflights answered by CORS still carry a request id.
        .layer(from_fn(request_id_middleware));

    Ok(app)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the production OpenAI provider.
    pub async fn build(config: SummarizerConfig) -> Result<Self, AppError> {
        let provider = OpenAiProvider::new(OpenAiProviderConfig {
            api_key: config.openai.api_key.clone(),
            base_url: config.openai.base_url.clone(),
        })
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(
            model = %config.openai.model,
            base_url = %config.openai.base_url,
            api_key_present = config.openai.has_api_key(),
            "Initialized OpenAI provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an arbitrary provider.
    pub async fn build_with_provider(
        config: SummarizerConfig,
        provider: Arc<dyn SummaryProvider>,
    ) -> Result<Self, AppError> {
        init_metrics();

        if config.artifacts.enabled {
            tracing::info!(directory = %config.artifacts.directory, "Log artifacts enabled");
        }

        let addr = config.common.socket_addr()?;
        let state = AppState::new(config, provider);
        let router = build_router(state)?;

        // Port 0 = random port for testing
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

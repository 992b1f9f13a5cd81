#![allow(dead_code)]

use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;
use summarizer_service::config::{
    AppInfo, ArtifactConfig, CorsConfig, HealthConfig, OpenAiConfig, SummarizerConfig,
};
use summarizer_service::services::providers::mock::MockSummaryProvider;
use summarizer_service::startup::Application;
use uuid::Uuid;

pub const TEST_ORIGIN: &str = "http://localhost:5173";

/// Config that passes every health check on any machine.
pub fn test_config() -> SummarizerConfig {
    SummarizerConfig {
        common: CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port for testing
        },
        app: AppInfo {
            version: "1.4.2".to_string(),
            environment: "test".to_string(),
        },
        openai: OpenAiConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "gpt-4o-mini".to_string(),
        },
        cors: CorsConfig {
            allowed_origin: TEST_ORIGIN.to_string(),
        },
        artifacts: ArtifactConfig {
            enabled: false,
            directory: format!("target/test-artifacts-{}", Uuid::new_v4()),
        },
        health: HealthConfig {
            disk_path: ".".to_string(),
            min_free_bytes: 0,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub provider: Arc<MockSummaryProvider>,
    pub artifact_dir: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(config: SummarizerConfig, provider: MockSummaryProvider) -> Self {
        let provider = Arc::new(provider);
        let artifact_dir = config.artifacts.directory.clone();

        let app = Application::build_with_provider(config, provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let metrics_url = format!("{}/metrics", address);
        for _ in 0..50 {
            if client.get(&metrics_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            provider,
            artifact_dir,
            client,
        }
    }

    pub async fn spawn_default() -> Self {
        Self::spawn(test_config(), MockSummaryProvider::replying("A fixed summary.")).await
    }

    pub async fn get_health(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/healthcheck", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_summarize(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/summarize", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Remove any artifact files written by this app.
    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.artifact_dir).await;
    }
}

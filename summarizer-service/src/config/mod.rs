use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// 1 GiB. Below this the health check reports the disk as critical.
pub const DEFAULT_MIN_FREE_DISK_BYTES: u64 = 1024 * 1024 * 1024;

/// Name of the upstream credential variable. Health messages quote it verbatim.
pub const API_KEY_ENV: &str = "OPENAI_APIKEY";

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub app: AppInfo,
    pub openai: OpenAiConfig,
    pub cors: CorsConfig,
    pub artifacts: ArtifactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    pub version: String,
    pub environment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// `None` keeps the service up; the health check reports it as critical.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl OpenAiConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    pub enabled: bool,
    pub directory: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    pub disk_path: String,
    pub min_free_bytes: u64,
}

impl SummarizerConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let environment = get_env("APP_ENVIRONMENT", None)?;
        let is_prod = environment == "prod";

        let model = if is_prod {
            get_env("OPENAI_MODEL", None)?
        } else {
            get_env("OPENAI_MODEL", Some("gpt-4o-mini"))?
        };

        Ok(SummarizerConfig {
            common: common_config,
            app: AppInfo {
                version: get_env("APP_VERSION", None)?,
                environment,
            },
            openai: OpenAiConfig {
                api_key: env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()),
                base_url: get_env("OPENAI_BASE_URL", Some("https://api.openai.com/v1"))?,
                model,
            },
            cors: CorsConfig {
                allowed_origin: get_env("CORS_ALLOWED_ORIGIN", Some("http://localhost:5173"))?,
            },
            artifacts: ArtifactConfig {
                enabled: parse_env("SUMMARY_LOG_ENABLED", false)?,
                directory: get_env("SUMMARY_LOG_DIR", Some("logs"))?,
            },
            health: HealthConfig {
                disk_path: get_env("HEALTH_DISK_PATH", Some("."))?,
                min_free_bytes: parse_env("HEALTH_MIN_FREE_BYTES", DEFAULT_MIN_FREE_DISK_BYTES)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => val.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value: {}", key, e))
        }),
        _ => Ok(default),
    }
}

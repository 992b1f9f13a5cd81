//! Best-effort JSON audit files for summarization calls.
//!
//! Each logged event becomes `{kind}_{stamp}.json` in the configured
//! directory. A request and its response or error share the same stamp, so
//! the pair can be found by swapping the prefix. Stamps have one-second
//! resolution; two requests in the same second overwrite each other's files.

use crate::config::ArtifactConfig;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArtifactKind {
    #[serde(rename = "req")]
    Request,
    #[serde(rename = "res")]
    Response,
    #[serde(rename = "err")]
    Error,
}

impl ArtifactKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Request => "req",
            ArtifactKind::Response => "res",
            ArtifactKind::Error => "err",
        }
    }
}

#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    timestamp: String,
    kind: ArtifactKind,
    payload: &'a serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct ArtifactLog {
    directory: PathBuf,
    enabled: bool,
}

impl ArtifactLog {
    pub fn new(config: &ArtifactConfig) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            enabled: config.enabled,
        }
    }

    pub fn disabled() -> Self {
        Self {
            directory: PathBuf::new(),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Compact, filename-safe stamp with one-second resolution.
    pub fn stamp(now: DateTime<Utc>) -> String {
        now.format("%Y%m%dT%H%M%S").to_string()
    }

    pub fn file_name(kind: ArtifactKind, stamp: &str) -> String {
        format!("{}_{}.json", kind.prefix(), stamp)
    }

    /// Write one record. Failures are logged and swallowed; returns the path
    /// on success.
    pub async fn write(
        &self,
        kind: ArtifactKind,
        stamp: &str,
        payload: &serde_json::Value,
    ) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }

        let path = self.directory.join(Self::file_name(kind, stamp));
        match self.try_write(&path, kind, payload).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), kind = kind.prefix(), "Wrote log artifact");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    kind = kind.prefix(),
                    error = %e,
                    "Failed to write log artifact (non-critical)"
                );
                None
            }
        }
    }

    async fn try_write(
        &self,
        path: &Path,
        kind: ArtifactKind,
        payload: &serde_json::Value,
    ) -> std::io::Result<()> {
        if !self.directory.exists() {
            fs::create_dir_all(&self.directory).await?;
        }

        let record = LogRecord {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            kind,
            payload,
        };
        let body = serde_json::to_vec_pretty(&record).map_err(std::io::Error::other)?;
        fs::write(path, body).await
    }
}

use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Address the HTTP listener binds to. Port 0 picks a random port.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Invalid listen address {}:{}: {}",
                    self.host,
                    self.port,
                    e
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 0);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn socket_addr_rejects_bad_host() {
        let config = Config {
            host: "not a host".to_string(),
            port: 8080,
        };
        assert!(matches!(
            config.socket_addr(),
            Err(AppError::ConfigError(_))
        ));
    }
}

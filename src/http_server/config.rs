//! Listener settings for the user API

use std::net::{AddrParseError, SocketAddr};

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// Where the user API listens and which browser origins may call it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Port the original user service listened on
fn default_port() -> u16 {
    8081
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Loopback listener on `port`, used by `serve --port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as written in the config
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Address to bind; the host must be an IP literal
    pub fn listen_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.socket_addr().parse()
    }

    /// Configured origins that are valid header values. Invalid entries are skipped.
    pub fn allowed_origins(&self) -> Vec<HeaderValue> {
        self.cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_loopback_user_port() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "127.0.0.1:8081");
        assert!(config.allowed_origins().is_empty());
    }

    #[test]
    fn test_port_only_config_keeps_loopback() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.listen_addr().unwrap(), "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn test_hostname_is_not_a_listen_addr() {
        let config = HttpServerConfig {
            host: "users.internal".to_string(),
            ..Default::default()
        };
        assert!(config.listen_addr().is_err());
    }

    #[test]
    fn test_invalid_origins_are_skipped() {
        let config = HttpServerConfig {
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "bad\norigin".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(config.allowed_origins(), vec!["http://localhost:5173"]);
    }
}

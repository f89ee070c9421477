use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::upstream::{HttpUpstreamConfig, SimulatedConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Upstream data source configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Which data source backs the aggregator
    #[serde(default)]
    pub backend: UpstreamBackend,
    /// Simulator settings (used when backend = "simulated")
    #[serde(default)]
    pub simulated: SimulatedConfig,
    /// Remote service settings (required when backend = "http")
    #[serde(default)]
    pub http: Option<HttpUpstreamConfig>,
}

/// Available upstream backends
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamBackend {
    #[default]
    Simulated,
    Http,
}

impl UpstreamBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Http => "http",
        }
    }
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub upstream: SanitizedUpstreamConfig,
}

/// Sanitized upstream config
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedUpstreamConfig {
    pub backend: String,
    pub simulated: SimulatedConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<SanitizedHttpUpstreamConfig>,
}

/// Sanitized HTTP upstream config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedHttpUpstreamConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            upstream: SanitizedUpstreamConfig {
                backend: config.upstream.backend.as_str().to_string(),
                simulated: config.upstream.simulated.clone(),
                http: config
                    .upstream
                    .http
                    .as_ref()
                    .map(|h| SanitizedHttpUpstreamConfig {
                        url: h.url.clone(),
                        api_key_configured: h.api_key.as_ref().is_some_and(|k| !k.is_empty()),
                        timeout_secs: h.timeout_secs,
                    }),
            },
        }
    }
}

//! Monitor configuration

use anyhow::Result;
use serde::Deserialize;

/// Monitor configuration, loaded from HPA_-prefixed environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// HTTP listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Display tolerance applied to replica bounds (0.0 to 1.0)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Seconds between WebSocket broadcasts
    #[serde(default = "default_websocket_interval")]
    pub websocket_interval_secs: u64,

    /// Deadline for each cluster API request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_port() -> u16 {
    8080
}

fn default_tolerance() -> f64 {
    0.1
}

fn default_websocket_interval() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    10
}

impl MonitorConfig {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("HPA").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| MonitorConfig {
            port: default_port(),
            tolerance: default_tolerance(),
            websocket_interval_secs: default_websocket_interval(),
            request_timeout_secs: default_request_timeout(),
        }))
    }
}

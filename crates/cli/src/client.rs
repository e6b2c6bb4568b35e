//! API client for communicating with the HPA Monitor

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// API client for the HPA Monitor REST endpoints
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }
}

// API response types

/// One enriched autoscaler status record, mirroring the server's JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HpaStatus {
    pub name: String,
    pub namespace: String,
    pub min_replicas: i32,
    pub max_replicas: i32,
    pub current_replicas: i32,
    pub desired_replicas: i32,
    #[serde(rename = "currentCPUUtilization")]
    pub current_cpu_utilization: Option<i32>,
    #[serde(rename = "targetCPUUtilization")]
    pub target_cpu_utilization: Option<i32>,
    pub primary_metric_name: String,
    pub primary_metric_current: Option<String>,
    pub primary_metric_target: Option<String>,
    pub ratio: Option<f64>,
    pub tolerance: f64,
    pub tolerance_adjusted_min: i32,
    pub tolerance_adjusted_max: i32,
    pub last_scale_time: Option<String>,
    pub ready: bool,
    pub scale_up_stabilized: bool,
    pub scale_down_stabilized: bool,
    pub events: Vec<HpaEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HpaEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub reason: String,
    pub message: String,
    #[serde(rename = "firstTimestamp")]
    pub first_timestamp: String,
    #[serde(rename = "lastTimestamp")]
    pub last_timestamp: String,
    pub count: i32,
}

/// Server configuration as reported by /api/config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub websocket_interval: u64,
    pub tolerance: f64,
}

/// Health response from /healthz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

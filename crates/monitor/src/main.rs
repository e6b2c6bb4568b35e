//! HPA Monitor - cluster autoscaler status service
//!
//! Polls the cluster for HorizontalPodAutoscaler objects and serves
//! enriched, UI-ready status records over REST and WebSocket.

use anyhow::Result;
use monitor_lib::{HpaMonitor, KubeClusterClient, MonitorMetrics};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("HPA Monitor starting up");

    // Load configuration
    let config = config::MonitorConfig::load()?;
    info!(
        port = config.port,
        tolerance = config.tolerance,
        websocket_interval = config.websocket_interval_secs,
        "Configuration loaded"
    );

    // Create Kubernetes-backed cluster client
    let cluster = Arc::new(
        KubeClusterClient::connect(Duration::from_secs(config.request_timeout_secs)).await?,
    );

    // Create the monitor and apply the configured tolerance
    let monitor = Arc::new(HpaMonitor::new(cluster.clone(), cluster));
    monitor.set_tolerance(config.tolerance).await;
    info!(tolerance = config.tolerance, "HPA monitor created");

    // Initialize metrics
    let metrics = MonitorMetrics::new();

    // Create shared application state
    let state = Arc::new(api::AppState::new(monitor, config.clone(), metrics));

    // Start the API server
    let api_handle = tokio::spawn(api::serve(config.port, state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    api_handle.abort();

    Ok(())
}

//! HTTP and WebSocket API for HPA status
//!
//! REST consumers poll `/api/hpa`; WebSocket consumers receive the same
//! status array on a fixed broadcast interval.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use monitor_lib::{HpaMonitor, HpaStatus, MonitorMetrics};
use prometheus::{Encoder, TextEncoder};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info};

use crate::config::MonitorConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub monitor: Arc<HpaMonitor>,
    pub config: MonitorConfig,
    pub metrics: MonitorMetrics,
}

impl AppState {
    pub fn new(monitor: Arc<HpaMonitor>, config: MonitorConfig, metrics: MonitorMetrics) -> Self {
        Self {
            monitor,
            config,
            metrics,
        }
    }
}

/// HPA status endpoint - one polling cycle per request
async fn hpa_statuses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HpaStatus>>, (StatusCode, Json<Value>)> {
    let started = Instant::now();

    match state.monitor.get_statuses().await {
        Ok(statuses) => {
            state
                .metrics
                .observe_poll_cycle(started.elapsed().as_secs_f64(), statuses.len());
            debug!(hpa_count = statuses.len(), "HTTP API request completed");
            Ok(Json(statuses))
        }
        Err(error) => {
            state.metrics.inc_list_errors();
            error!(error = %error, "Failed to get HPA status via HTTP API");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error.to_string() })),
            ))
        }
    }
}

/// Configuration endpoint for UI clients
async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "websocketInterval": state.config.websocket_interval_secs,
        "tolerance": state.monitor.get_tolerance().await,
    }))
}

/// Health check endpoint
async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// WebSocket upgrade for the periodic status broadcast
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_broadcast_loop(socket, state))
}

async fn ws_broadcast_loop(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket connection established");
    state.metrics.inc_websocket_clients();

    let mut ticker = interval(Duration::from_secs(state.config.websocket_interval_secs));
    // The first tick completes immediately; skip it so broadcasts start one
    // interval after connect
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let started = Instant::now();
        let statuses = match state.monitor.get_statuses().await {
            Ok(statuses) => {
                state
                    .metrics
                    .observe_poll_cycle(started.elapsed().as_secs_f64(), statuses.len());
                statuses
            }
            Err(error) => {
                state.metrics.inc_list_errors();
                error!(error = %error, "Error getting HPA status for websocket");
                continue;
            }
        };

        let payload = match serde_json::to_string(&statuses) {
            Ok(payload) => payload,
            Err(error) => {
                error!(error = %error, "Failed to serialize HPA statuses");
                continue;
            }
        };

        if let Err(error) = socket.send(Message::Text(payload)).await {
            error!(error = %error, "Error writing JSON to websocket");
            break;
        }

        debug!(hpa_count = statuses.len(), "WebSocket data sent");
    }

    state.metrics.dec_websocket_clients();
    info!("WebSocket connection closed");
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/hpa", get(hpa_statuses))
        .route("/api/config", get(get_config))
        .route("/ws", get(ws_handler))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

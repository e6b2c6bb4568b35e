//! Core library for the HPA monitor
//!
//! This crate provides the core functionality for:
//! - Snapshot models for autoscalers and their metrics
//! - Primary-metric extraction and unit normalization
//! - Ratio, tolerance and stabilization arithmetic
//! - Event correlation
//! - Cluster API access behind trait seams
//! - Prometheus observability

pub mod cluster;
pub mod events;
pub mod extract;
pub mod models;
pub mod monitor;
pub mod observability;
pub mod ratio;
pub mod status;
pub mod units;

pub use cluster::{AutoscalerLister, EventLister, FetchError, KubeClusterClient};
pub use models::*;
pub use monitor::HpaMonitor;
pub use observability::MonitorMetrics;

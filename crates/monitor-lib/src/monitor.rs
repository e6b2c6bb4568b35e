//! Monitor orchestration
//!
//! One `get_statuses` call is one polling cycle: a fresh cluster snapshot
//! transformed into UI-ready records. No state is carried between cycles;
//! staleness would defeat the monitoring purpose.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cluster::{AutoscalerLister, EventLister, FetchError};
use crate::events::correlate_events;
use crate::models::HpaStatus;
use crate::status::build_status;

/// Default display tolerance (10%)
const DEFAULT_TOLERANCE: f64 = 0.1;

/// Polls the cluster and produces enriched autoscaler status records.
///
/// Tolerance is process-wide mutable configuration; each cycle reads it
/// exactly once so concurrent updates never produce a record whose bounds
/// disagree with its recorded tolerance.
pub struct HpaMonitor {
    autoscalers: Arc<dyn AutoscalerLister>,
    events: Arc<dyn EventLister>,
    tolerance: RwLock<f64>,
}

impl HpaMonitor {
    pub fn new(autoscalers: Arc<dyn AutoscalerLister>, events: Arc<dyn EventLister>) -> Self {
        Self {
            autoscalers,
            events,
            tolerance: RwLock::new(DEFAULT_TOLERANCE),
        }
    }

    /// Run one polling cycle over every autoscaler in the cluster.
    ///
    /// A failed autoscaler listing aborts the whole cycle; a failed event
    /// listing degrades that one record to an empty event list.
    pub async fn get_statuses(&self) -> Result<Vec<HpaStatus>, FetchError> {
        let tolerance = *self.tolerance.read().await;

        let snapshots = self.autoscalers.list_autoscalers().await?;
        info!(count = snapshots.len(), "Processing HPAs");

        let now = Utc::now();
        let mut statuses = Vec::with_capacity(snapshots.len());

        for snapshot in &snapshots {
            let mut status = build_status(snapshot, tolerance, now);
            status.events =
                correlate_events(self.events.as_ref(), &snapshot.namespace, &snapshot.name).await;

            let current = status.primary_metric_current.as_deref().unwrap_or("N/A");
            let target = status.primary_metric_target.as_deref().unwrap_or("N/A");
            debug!(
                namespace = %status.namespace,
                name = %status.name,
                metric = %status.primary_metric_name,
                current = %current,
                target = %target,
                current_replicas = status.current_replicas,
                desired_replicas = status.desired_replicas,
                min_replicas = status.min_replicas,
                max_replicas = status.max_replicas,
                "HPA status processed"
            );

            statuses.push(status);
        }

        Ok(statuses)
    }

    /// Update the display tolerance. Values outside `[0.0, 1.0]` are
    /// rejected with a warning and the previous value is retained.
    pub async fn set_tolerance(&self, tolerance: f64) {
        if (0.0..=1.0).contains(&tolerance) {
            *self.tolerance.write().await = tolerance;
            info!(
                tolerance,
                percentage = tolerance * 100.0,
                "Tolerance updated"
            );
        } else {
            warn!(
                tolerance,
                "Invalid tolerance value. Must be between 0.0 and 1.0"
            );
        }
    }

    pub async fn get_tolerance(&self) -> f64 {
        *self.tolerance.read().await
    }
}

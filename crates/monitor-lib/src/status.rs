//! Status record assembly
//!
//! One call builds one immutable record from one autoscaler snapshot; the
//! clock and tolerance are passed in so builds stay pure and testable.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::extract::extract_metrics;
use crate::models::{AutoscalerSnapshot, HpaStatus};
use crate::ratio::calculate_ratio;

/// Cooldown after the last scaling event before scale-up is considered
/// stabilized again
const SCALE_UP_STABILIZATION_SECS: i64 = 3 * 60;

/// Cooldown after the last scaling event before scale-down is considered
/// stabilized again
const SCALE_DOWN_STABILIZATION_SECS: i64 = 5 * 60;

/// Replica floor assumed when the autoscaler spec leaves minReplicas unset
const DEFAULT_MIN_REPLICAS: i32 = 1;

/// Condition type whose status string decides refined readiness
const SCALING_ACTIVE_CONDITION: &str = "ScalingActive";

/// Build a complete status record from one autoscaler snapshot.
///
/// `tolerance` must be the single value read at the start of the polling
/// cycle so the recorded tolerance never disagrees with the adjusted
/// bounds. Events are attached separately by the caller.
pub fn build_status(
    snapshot: &AutoscalerSnapshot,
    tolerance: f64,
    now: DateTime<Utc>,
) -> HpaStatus {
    let min_replicas = snapshot.min_replicas.unwrap_or(DEFAULT_MIN_REPLICAS);

    let mut status = HpaStatus {
        name: snapshot.name.clone(),
        namespace: snapshot.namespace.clone(),
        min_replicas,
        max_replicas: snapshot.max_replicas,
        current_replicas: snapshot.current_replicas,
        desired_replicas: snapshot.desired_replicas,
        current_cpu_utilization: None,
        target_cpu_utilization: None,
        primary_metric_name: String::new(),
        primary_metric_current: None,
        primary_metric_target: None,
        ratio: None,
        tolerance,
        tolerance_adjusted_min: (f64::from(min_replicas) * (1.0 - tolerance)).ceil() as i32,
        tolerance_adjusted_max: (f64::from(snapshot.max_replicas) * (1.0 + tolerance)).floor()
            as i32,
        last_scale_time: snapshot
            .last_scale_time
            .map(|time| time.to_rfc3339_opts(SecondsFormat::Secs, true)),
        // Coarse default: any reported condition counts as ready
        ready: !snapshot.conditions.is_empty(),
        scale_up_stabilized: true,
        scale_down_stabilized: true,
        events: Vec::new(),
    };

    extract_metrics(&snapshot.target_metrics, &snapshot.current_metrics, &mut status);

    status.ratio = calculate_ratio(&status);
    if status.primary_metric_name.is_empty() {
        status.primary_metric_name = "Unknown".to_string();
    }

    refine_readiness(snapshot, &mut status);
    check_stabilization(snapshot, &mut status, now);

    status
}

/// Override the coarse readiness default with the ScalingActive condition
/// when the autoscaler reports one; absence leaves the default standing.
fn refine_readiness(snapshot: &AutoscalerSnapshot, status: &mut HpaStatus) {
    for condition in &snapshot.conditions {
        if condition.condition_type == SCALING_ACTIVE_CONDITION {
            status.ready = condition.status == "True";
        }
    }
}

/// An autoscaler that never scaled is fully stabilized; otherwise the
/// elapsed time since the last scale decides each window independently.
fn check_stabilization(snapshot: &AutoscalerSnapshot, status: &mut HpaStatus, now: DateTime<Utc>) {
    if let Some(last_scale) = snapshot.last_scale_time {
        let elapsed = now.signed_duration_since(last_scale);
        status.scale_up_stabilized = elapsed > Duration::seconds(SCALE_UP_STABILIZATION_SECS);
        status.scale_down_stabilized = elapsed > Duration::seconds(SCALE_DOWN_STABILIZATION_SECS);
    }
}

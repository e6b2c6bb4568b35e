//! Core data models for the HPA monitor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of one HorizontalPodAutoscaler, decoupled from the
/// cluster API types so the core transforms stay testable offline.
#[derive(Debug, Clone)]
pub struct AutoscalerSnapshot {
    pub name: String,
    pub namespace: String,
    pub min_replicas: Option<i32>,
    pub max_replicas: i32,
    pub current_replicas: i32,
    pub desired_replicas: i32,
    pub target_metrics: Vec<TargetMetric>,
    pub current_metrics: Vec<CurrentMetric>,
    pub conditions: Vec<AutoscalerCondition>,
    pub last_scale_time: Option<DateTime<Utc>>,
}

/// One status condition reported by the autoscaler
#[derive(Debug, Clone)]
pub struct AutoscalerCondition {
    pub condition_type: String,
    pub status: String,
}

/// Target-side metric spec. Each variant owns exactly the fields its kind
/// can populate; utilization is an integer percentage, everything else is
/// an opaque quantity string.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetMetric {
    Resource {
        name: String,
        average_utilization: Option<i32>,
    },
    ContainerResource {
        name: String,
        average_utilization: Option<i32>,
        average_value: Option<String>,
    },
    External {
        name: String,
        average_value: Option<String>,
        value: Option<String>,
    },
    Object {
        name: String,
        average_value: Option<String>,
        value: Option<String>,
    },
}

/// Current-side metric value. The cluster API does not guarantee a metric
/// name on External and Object current entries, so those variants carry
/// values only.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentMetric {
    Resource {
        name: String,
        average_utilization: Option<i32>,
    },
    ContainerResource {
        average_utilization: Option<i32>,
        average_value: Option<String>,
    },
    External {
        average_value: Option<String>,
        value: Option<String>,
    },
    Object {
        average_value: Option<String>,
        value: Option<String>,
    },
}

/// Cluster event before display formatting
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub event_type: String,
    pub reason: String,
    pub message: String,
    pub count: i32,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
}

/// UI-facing event record correlated to one autoscaler
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

/// Enriched status record for one autoscaler, immutable once built.
///
/// The JSON key set is a UI contract: optional fields carry no
/// `skip_serializing_if`, so an absent value serializes as an explicit
/// `null` rather than a missing key.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_status() -> HpaStatus {
        HpaStatus {
            name: "web".to_string(),
            namespace: "default".to_string(),
            min_replicas: 1,
            max_replicas: 10,
            current_replicas: 2,
            desired_replicas: 2,
            current_cpu_utilization: None,
            target_cpu_utilization: None,
            primary_metric_name: "Unknown".to_string(),
            primary_metric_current: None,
            primary_metric_target: None,
            ratio: None,
            tolerance: 0.1,
            tolerance_adjusted_min: 1,
            tolerance_adjusted_max: 11,
            last_scale_time: None,
            ready: false,
            scale_up_stabilized: true,
            scale_down_stabilized: true,
            events: Vec::new(),
        }
    }

    #[test]
    fn test_absent_fields_serialize_as_explicit_null() {
        let value = serde_json::to_value(empty_status()).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "currentCPUUtilization",
            "targetCPUUtilization",
            "primaryMetricCurrent",
            "primaryMetricTarget",
            "ratio",
            "lastScaleTime",
        ] {
            assert!(object.contains_key(key), "missing key {}", key);
            assert!(object[key].is_null(), "key {} should be null", key);
        }
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let value = serde_json::to_value(empty_status()).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "minReplicas",
            "maxReplicas",
            "currentReplicas",
            "desiredReplicas",
            "primaryMetricName",
            "toleranceAdjustedMin",
            "toleranceAdjustedMax",
            "scaleUpStabilized",
            "scaleDownStabilized",
            "events",
        ] {
            assert!(object.contains_key(key), "missing key {}", key);
        }
    }

    #[test]
    fn test_event_timestamp_keys() {
        let event = HpaEvent {
            event_type: "Normal".to_string(),
            reason: "SuccessfulRescale".to_string(),
            message: "New size: 4".to_string(),
            first_timestamp: "Unknown".to_string(),
            last_timestamp: "2024-01-01T00:00:00Z".to_string(),
            count: 3,
        };

        let value = serde_json::to_value(event).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("type"));
        assert!(object.contains_key("firstTimestamp"));
        assert!(object.contains_key("lastTimestamp"));
    }
}

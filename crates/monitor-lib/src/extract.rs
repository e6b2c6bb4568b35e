//! Primary-metric extraction
//!
//! Reduces an autoscaler's heterogeneous metric specs to the single primary
//! metric surfaced on status records. Only the first declared metric is
//! ever used; subsequent entries are ignored. That is deliberate policy,
//! not an oversight.

use crate::models::{CurrentMetric, HpaStatus, TargetMetric};
use crate::units::normalize_metric_value;

/// Populate the primary metric fields (and the legacy CPU fields) on
/// `status` from the snapshot's metric sequences. Empty sequences leave
/// the corresponding fields unset.
pub fn extract_metrics(
    targets: &[TargetMetric],
    currents: &[CurrentMetric],
    status: &mut HpaStatus,
) {
    if let Some(metric) = targets.first() {
        extract_target(metric, status);
    }

    if let Some(metric) = currents.first() {
        extract_current(metric, status);
    }
}

fn extract_target(metric: &TargetMetric, status: &mut HpaStatus) {
    match metric {
        TargetMetric::Resource {
            name,
            average_utilization,
        } => {
            status.primary_metric_name = name.clone();
            if let Some(utilization) = average_utilization {
                status.primary_metric_target = Some(format!("{}%", utilization));
            }
            // Legacy field kept for backwards compatibility with older UIs
            if name == "cpu" {
                status.target_cpu_utilization = *average_utilization;
            }
        }
        TargetMetric::ContainerResource {
            name,
            average_utilization,
            average_value,
        } => {
            status.primary_metric_name = name.clone();
            if let Some(utilization) = average_utilization {
                status.primary_metric_target = Some(format!("{}%", utilization));
            } else if let Some(quantity) = average_value {
                status.primary_metric_target = Some(quantity.clone());
            }
        }
        TargetMetric::External {
            name,
            average_value,
            value,
        } => {
            status.primary_metric_name = name.clone();
            if let Some(quantity) = average_value.as_deref().or(value.as_deref()) {
                status.primary_metric_target = Some(normalize_metric_value(quantity, name));
            }
        }
        TargetMetric::Object {
            name,
            average_value,
            value,
        } => {
            // Object quantities are surfaced raw, unlike External quantities
            // which go through the normalizer; see DESIGN.md before unifying.
            status.primary_metric_name = name.clone();
            if let Some(quantity) = average_value.as_ref().or(value.as_ref()) {
                status.primary_metric_target = Some(quantity.clone());
            }
        }
    }
}

fn extract_current(metric: &CurrentMetric, status: &mut HpaStatus) {
    match metric {
        CurrentMetric::Resource {
            name,
            average_utilization,
        } => {
            if let Some(utilization) = average_utilization {
                status.primary_metric_current = Some(format!("{}%", utilization));
            }
            if name == "cpu" {
                status.current_cpu_utilization = *average_utilization;
            }
        }
        CurrentMetric::ContainerResource {
            average_utilization,
            average_value,
        } => {
            if let Some(utilization) = average_utilization {
                status.primary_metric_current = Some(format!("{}%", utilization));
            } else if let Some(quantity) = average_value {
                status.primary_metric_current = Some(quantity.clone());
            }
        }
        CurrentMetric::External {
            average_value,
            value,
        } => {
            // Current-value entries carry no reliable metric name; key the
            // normalizer by the already-resolved primary metric name.
            if let Some(quantity) = average_value.as_deref().or(value.as_deref()) {
                let normalized = normalize_metric_value(quantity, &status.primary_metric_name);
                status.primary_metric_current = Some(normalized);
            }
        }
        CurrentMetric::Object {
            average_value,
            value,
        } => {
            if let Some(quantity) = average_value.as_ref().or(value.as_ref()) {
                status.primary_metric_current = Some(quantity.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_status() -> HpaStatus {
        HpaStatus {
            name: "web".to_string(),
            namespace: "default".to_string(),
            min_replicas: 1,
            max_replicas: 10,
            current_replicas: 2,
            desired_replicas: 2,
            current_cpu_utilization: None,
            target_cpu_utilization: None,
            primary_metric_name: String::new(),
            primary_metric_current: None,
            primary_metric_target: None,
            ratio: None,
            tolerance: 0.1,
            tolerance_adjusted_min: 1,
            tolerance_adjusted_max: 11,
            last_scale_time: None,
            ready: true,
            scale_up_stabilized: true,
            scale_down_stabilized: true,
            events: Vec::new(),
        }
    }

    #[test]
    fn test_resource_cpu_sets_legacy_fields() {
        let mut status = blank_status();
        extract_metrics(
            &[TargetMetric::Resource {
                name: "cpu".to_string(),
                average_utilization: Some(60),
            }],
            &[CurrentMetric::Resource {
                name: "cpu".to_string(),
                average_utilization: Some(30),
            }],
            &mut status,
        );

        assert_eq!(status.primary_metric_name, "cpu");
        assert_eq!(status.primary_metric_target.as_deref(), Some("60%"));
        assert_eq!(status.primary_metric_current.as_deref(), Some("30%"));
        assert_eq!(status.target_cpu_utilization, Some(60));
        assert_eq!(status.current_cpu_utilization, Some(30));
    }

    #[test]
    fn test_resource_memory_leaves_legacy_fields_unset() {
        let mut status = blank_status();
        extract_metrics(
            &[TargetMetric::Resource {
                name: "memory".to_string(),
                average_utilization: Some(80),
            }],
            &[CurrentMetric::Resource {
                name: "memory".to_string(),
                average_utilization: Some(55),
            }],
            &mut status,
        );

        assert_eq!(status.primary_metric_name, "memory");
        assert_eq!(status.primary_metric_target.as_deref(), Some("80%"));
        assert_eq!(status.target_cpu_utilization, None);
        assert_eq!(status.current_cpu_utilization, None);
    }

    #[test]
    fn test_resource_without_utilization_leaves_target_unset() {
        let mut status = blank_status();
        extract_metrics(
            &[TargetMetric::Resource {
                name: "cpu".to_string(),
                average_utilization: None,
            }],
            &[],
            &mut status,
        );

        assert_eq!(status.primary_metric_name, "cpu");
        assert_eq!(status.primary_metric_target, None);
        assert_eq!(status.target_cpu_utilization, None);
    }

    #[test]
    fn test_container_resource_falls_back_to_quantity() {
        let mut status = blank_status();
        extract_metrics(
            &[TargetMetric::ContainerResource {
                name: "cpu".to_string(),
                average_utilization: None,
                average_value: Some("500m".to_string()),
            }],
            &[CurrentMetric::ContainerResource {
                average_utilization: None,
                average_value: Some("250m".to_string()),
            }],
            &mut status,
        );

        assert_eq!(status.primary_metric_target.as_deref(), Some("500m"));
        assert_eq!(status.primary_metric_current.as_deref(), Some("250m"));
        // ContainerResource never populates the legacy CPU fields
        assert_eq!(status.target_cpu_utilization, None);
        assert_eq!(status.current_cpu_utilization, None);
    }

    #[test]
    fn test_external_values_are_normalized() {
        let mut status = blank_status();
        extract_metrics(
            &[TargetMetric::External {
                name: "queue_depth".to_string(),
                average_value: Some("1000m".to_string()),
                value: None,
            }],
            &[CurrentMetric::External {
                average_value: None,
                value: Some("500m".to_string()),
            }],
            &mut status,
        );

        assert_eq!(status.primary_metric_name, "queue_depth");
        assert_eq!(status.primary_metric_target.as_deref(), Some("1"));
        assert_eq!(status.primary_metric_current.as_deref(), Some("0.50"));
    }

    #[test]
    fn test_external_prefers_average_value() {
        let mut status = blank_status();
        extract_metrics(
            &[TargetMetric::External {
                name: "requests".to_string(),
                average_value: Some("10".to_string()),
                value: Some("99".to_string()),
            }],
            &[],
            &mut status,
        );

        assert_eq!(status.primary_metric_target.as_deref(), Some("10"));
    }

    #[test]
    fn test_object_values_stay_raw() {
        let mut status = blank_status();
        extract_metrics(
            &[TargetMetric::Object {
                name: "ingress_qps".to_string(),
                average_value: Some("2000m".to_string()),
                value: None,
            }],
            &[CurrentMetric::Object {
                average_value: None,
                value: Some("1500m".to_string()),
            }],
            &mut status,
        );

        // Unlike External, Object quantities bypass the normalizer
        assert_eq!(status.primary_metric_target.as_deref(), Some("2000m"));
        assert_eq!(status.primary_metric_current.as_deref(), Some("1500m"));
    }

    #[test]
    fn test_first_metric_wins() {
        let mut status = blank_status();
        extract_metrics(
            &[
                TargetMetric::Resource {
                    name: "cpu".to_string(),
                    average_utilization: Some(60),
                },
                TargetMetric::External {
                    name: "queue_depth".to_string(),
                    average_value: Some("100".to_string()),
                    value: None,
                },
            ],
            &[],
            &mut status,
        );

        assert_eq!(status.primary_metric_name, "cpu");
        assert_eq!(status.primary_metric_target.as_deref(), Some("60%"));
    }

    #[test]
    fn test_empty_sequences_leave_fields_unset() {
        let mut status = blank_status();
        extract_metrics(&[], &[], &mut status);

        assert_eq!(status.primary_metric_name, "");
        assert_eq!(status.primary_metric_target, None);
        assert_eq!(status.primary_metric_current, None);
    }
}

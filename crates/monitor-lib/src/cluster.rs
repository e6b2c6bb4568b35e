//! Cluster API access
//!
//! Trait seams for the two collaborators the monitor consumes (autoscaler
//! listing and event listing) plus the kube-backed implementation. Every
//! request carries a deadline so a hung API server stalls one polling
//! cycle, never the whole service.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use k8s_openapi::api::autoscaling::v2::{HorizontalPodAutoscaler, MetricSpec, MetricStatus};
use k8s_openapi::api::core::v1::Event;
use kube::api::{Api, ListParams};
use kube::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{
    AutoscalerCondition, AutoscalerSnapshot, CurrentMetric, RawEvent, TargetMetric,
};

/// Errors from the cluster API collaborators
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cluster API request failed: {0}")]
    Api(#[from] kube::Error),

    #[error("cluster API request timed out after {0:?}")]
    Timeout(Duration),
}

/// Lists autoscalers cluster-wide, once per polling cycle
#[async_trait]
pub trait AutoscalerLister: Send + Sync {
    async fn list_autoscalers(&self) -> Result<Vec<AutoscalerSnapshot>, FetchError>;
}

/// Lists events involving one named object in a namespace
#[async_trait]
pub trait EventLister: Send + Sync {
    async fn list_events(
        &self,
        namespace: &str,
        involved_object: &str,
    ) -> Result<Vec<RawEvent>, FetchError>;
}

/// Kubernetes-backed implementation of both collaborator traits
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
    request_timeout: Duration,
}

impl KubeClusterClient {
    pub fn new(client: Client, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
        }
    }

    /// Connect using in-cluster configuration when available, falling back
    /// to the local kubeconfig.
    pub async fn connect(request_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::try_default()
            .await
            .context("Failed to create Kubernetes client")?;

        info!("Kubernetes client created successfully");
        Ok(Self::new(client, request_timeout))
    }
}

#[async_trait]
impl AutoscalerLister for KubeClusterClient {
    async fn list_autoscalers(&self) -> Result<Vec<AutoscalerSnapshot>, FetchError> {
        let api: Api<HorizontalPodAutoscaler> = Api::all(self.client.clone());

        let list = tokio::time::timeout(self.request_timeout, api.list(&ListParams::default()))
            .await
            .map_err(|_| FetchError::Timeout(self.request_timeout))??;

        debug!(count = list.items.len(), "Listed HPA resources");
        Ok(list.items.into_iter().map(snapshot_from_hpa).collect())
    }
}

#[async_trait]
impl EventLister for KubeClusterClient {
    async fn list_events(
        &self,
        namespace: &str,
        involved_object: &str,
    ) -> Result<Vec<RawEvent>, FetchError> {
        let api: Api<Event> = Api::namespaced(self.client.clone(), namespace);
        let params =
            ListParams::default().fields(&format!("involvedObject.name={}", involved_object));

        let list = tokio::time::timeout(self.request_timeout, api.list(&params))
            .await
            .map_err(|_| FetchError::Timeout(self.request_timeout))??;

        Ok(list.items.into_iter().map(raw_event_from_k8s).collect())
    }
}

fn snapshot_from_hpa(hpa: HorizontalPodAutoscaler) -> AutoscalerSnapshot {
    let spec = hpa.spec.unwrap_or_default();
    let status = hpa.status.unwrap_or_default();

    AutoscalerSnapshot {
        name: hpa.metadata.name.unwrap_or_default(),
        namespace: hpa.metadata.namespace.unwrap_or_default(),
        min_replicas: spec.min_replicas,
        max_replicas: spec.max_replicas,
        current_replicas: status.current_replicas.unwrap_or_default(),
        desired_replicas: status.desired_replicas,
        target_metrics: spec
            .metrics
            .unwrap_or_default()
            .into_iter()
            .filter_map(target_from_spec)
            .collect(),
        current_metrics: status
            .current_metrics
            .unwrap_or_default()
            .into_iter()
            .filter_map(current_from_status)
            .collect(),
        conditions: status
            .conditions
            .unwrap_or_default()
            .into_iter()
            .map(|condition| AutoscalerCondition {
                condition_type: condition.type_,
                status: condition.status,
            })
            .collect(),
        last_scale_time: status.last_scale_time.map(|time| time.0),
    }
}

/// Convert one target metric spec to the closed kind enum. Entries of an
/// unmodeled kind (e.g. Pods) or missing their kind payload are dropped,
/// which surfaces downstream as an "Unknown" primary metric.
fn target_from_spec(spec: MetricSpec) -> Option<TargetMetric> {
    match spec.type_.as_str() {
        "Resource" => spec.resource.map(|resource| TargetMetric::Resource {
            name: resource.name,
            average_utilization: resource.target.average_utilization,
        }),
        "ContainerResource" => {
            spec.container_resource
                .map(|resource| TargetMetric::ContainerResource {
                    name: resource.name,
                    average_utilization: resource.target.average_utilization,
                    average_value: resource.target.average_value.map(|quantity| quantity.0),
                })
        }
        "External" => spec.external.map(|external| TargetMetric::External {
            name: external.metric.name,
            average_value: external.target.average_value.map(|quantity| quantity.0),
            value: external.target.value.map(|quantity| quantity.0),
        }),
        "Object" => spec.object.map(|object| TargetMetric::Object {
            name: object.metric.name,
            average_value: object.target.average_value.map(|quantity| quantity.0),
            value: object.target.value.map(|quantity| quantity.0),
        }),
        _ => None,
    }
}

fn current_from_status(status: MetricStatus) -> Option<CurrentMetric> {
    match status.type_.as_str() {
        "Resource" => status.resource.map(|resource| CurrentMetric::Resource {
            name: resource.name,
            average_utilization: resource.current.average_utilization,
        }),
        "ContainerResource" => {
            status
                .container_resource
                .map(|resource| CurrentMetric::ContainerResource {
                    average_utilization: resource.current.average_utilization,
                    average_value: resource.current.average_value.map(|quantity| quantity.0),
                })
        }
        "External" => status.external.map(|external| CurrentMetric::External {
            average_value: external.current.average_value.map(|quantity| quantity.0),
            value: external.current.value.map(|quantity| quantity.0),
        }),
        "Object" => status.object.map(|object| CurrentMetric::Object {
            average_value: object.current.average_value.map(|quantity| quantity.0),
            value: object.current.value.map(|quantity| quantity.0),
        }),
        _ => None,
    }
}

fn raw_event_from_k8s(event: Event) -> RawEvent {
    RawEvent {
        event_type: event.type_.unwrap_or_default(),
        reason: event.reason.unwrap_or_default(),
        message: event.message.unwrap_or_default(),
        count: event.count.unwrap_or_default(),
        first_timestamp: event.first_timestamp.map(|time| time.0),
        last_timestamp: event.last_timestamp.map(|time| time.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::autoscaling::v2::{
        HorizontalPodAutoscalerSpec, HorizontalPodAutoscalerStatus, MetricTarget,
        ResourceMetricSource,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[test]
    fn test_snapshot_from_hpa_maps_core_fields() {
        let hpa = HorizontalPodAutoscaler {
            metadata: ObjectMeta {
                name: Some("web".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            spec: Some(HorizontalPodAutoscalerSpec {
                min_replicas: Some(2),
                max_replicas: 10,
                metrics: Some(vec![MetricSpec {
                    type_: "Resource".to_string(),
                    resource: Some(ResourceMetricSource {
                        name: "cpu".to_string(),
                        target: MetricTarget {
                            type_: "Utilization".to_string(),
                            average_utilization: Some(60),
                            ..Default::default()
                        },
                    }),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            status: Some(HorizontalPodAutoscalerStatus {
                current_replicas: Some(3),
                desired_replicas: 4,
                ..Default::default()
            }),
        };

        let snapshot = snapshot_from_hpa(hpa);
        assert_eq!(snapshot.name, "web");
        assert_eq!(snapshot.namespace, "default");
        assert_eq!(snapshot.min_replicas, Some(2));
        assert_eq!(snapshot.max_replicas, 10);
        assert_eq!(snapshot.current_replicas, 3);
        assert_eq!(snapshot.desired_replicas, 4);
        assert_eq!(
            snapshot.target_metrics,
            vec![TargetMetric::Resource {
                name: "cpu".to_string(),
                average_utilization: Some(60),
            }]
        );
    }

    #[test]
    fn test_unmodeled_metric_kinds_are_dropped() {
        let spec = MetricSpec {
            type_: "Pods".to_string(),
            ..Default::default()
        };
        assert_eq!(target_from_spec(spec), None);

        // A kind tag without its payload is dropped too
        let spec = MetricSpec {
            type_: "Resource".to_string(),
            ..Default::default()
        };
        assert_eq!(target_from_spec(spec), None);
    }

    #[test]
    fn test_event_conversion_keeps_unset_timestamps() {
        let event = Event {
            reason: Some("SuccessfulRescale".to_string()),
            message: Some("New size: 4".to_string()),
            type_: Some("Normal".to_string()),
            count: Some(2),
            ..Default::default()
        };

        let raw = raw_event_from_k8s(event);
        assert_eq!(raw.reason, "SuccessfulRescale");
        assert_eq!(raw.count, 2);
        assert_eq!(raw.first_timestamp, None);
        assert_eq!(raw.last_timestamp, None);
    }
}

//! Event correlation
//!
//! Attaches recent cluster events to a status record. Event data is
//! supplementary: a failed fetch degrades to an empty list and never fails
//! the status build.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::cluster::EventLister;
use crate::models::{HpaEvent, RawEvent};

/// Placeholder for events whose source timestamp was never set
const UNKNOWN_TIMESTAMP: &str = "Unknown";

/// Fetch and map the events involving one autoscaler.
pub async fn correlate_events(
    lister: &dyn EventLister,
    namespace: &str,
    name: &str,
) -> Vec<HpaEvent> {
    let raw = match lister.list_events(namespace, name).await {
        Ok(raw) => raw,
        Err(error) => {
            warn!(
                namespace = %namespace,
                name = %name,
                error = %error,
                "Failed to fetch events for HPA"
            );
            return Vec::new();
        }
    };

    debug!(
        namespace = %namespace,
        name = %name,
        event_count = raw.len(),
        "Fetched events for HPA"
    );

    raw.into_iter().map(to_hpa_event).collect()
}

fn to_hpa_event(event: RawEvent) -> HpaEvent {
    HpaEvent {
        event_type: event.event_type,
        reason: event.reason,
        message: event.message,
        first_timestamp: format_event_timestamp(event.first_timestamp),
        last_timestamp: format_event_timestamp(event.last_timestamp),
        count: event.count,
    }
}

fn format_event_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(time) => time.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => UNKNOWN_TIMESTAMP.to_string(),
    }
}

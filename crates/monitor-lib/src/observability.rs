//! Observability infrastructure for the monitor
//!
//! Prometheus metrics for polling cycles, cluster API failures and
//! WebSocket clients, exposed through the default registry.

use prometheus::{
    register_histogram, register_int_counter, register_int_gauge, Histogram, IntCounter, IntGauge,
};
use std::sync::OnceLock;

/// Histogram buckets for polling-cycle latency (in seconds); cycles are
/// dominated by cluster API round trips
const CYCLE_LATENCY_BUCKETS: &[f64] = &[0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<MonitorMetricsInner> = OnceLock::new();

struct MonitorMetricsInner {
    poll_cycle_duration_seconds: Histogram,
    poll_cycles_total: IntCounter,
    autoscaler_list_errors_total: IntCounter,
    hpas_processed: IntGauge,
    websocket_clients: IntGauge,
}

impl MonitorMetricsInner {
    fn new() -> Self {
        Self {
            poll_cycle_duration_seconds: register_histogram!(
                "hpa_monitor_poll_cycle_duration_seconds",
                "Time spent producing one full set of HPA status records",
                CYCLE_LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register poll_cycle_duration_seconds"),

            poll_cycles_total: register_int_counter!(
                "hpa_monitor_poll_cycles_total",
                "Total number of completed polling cycles"
            )
            .expect("Failed to register poll_cycles_total"),

            autoscaler_list_errors_total: register_int_counter!(
                "hpa_monitor_autoscaler_list_errors_total",
                "Total number of failed autoscaler listings"
            )
            .expect("Failed to register autoscaler_list_errors_total"),

            hpas_processed: register_int_gauge!(
                "hpa_monitor_hpas_processed",
                "Number of HPAs in the most recent polling cycle"
            )
            .expect("Failed to register hpas_processed"),

            websocket_clients: register_int_gauge!(
                "hpa_monitor_websocket_clients",
                "Number of connected WebSocket clients"
            )
            .expect("Failed to register websocket_clients"),
        }
    }
}

/// Monitor metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct MonitorMetrics {
    _private: (),
}

impl Default for MonitorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(MonitorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &MonitorMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record one completed polling cycle
    pub fn observe_poll_cycle(&self, duration_secs: f64, hpa_count: usize) {
        let inner = self.inner();
        inner.poll_cycle_duration_seconds.observe(duration_secs);
        inner.poll_cycles_total.inc();
        inner.hpas_processed.set(hpa_count as i64);
    }

    /// Record a failed autoscaler listing
    pub fn inc_list_errors(&self) {
        self.inner().autoscaler_list_errors_total.inc();
    }

    pub fn inc_websocket_clients(&self) {
        self.inner().websocket_clients.inc();
    }

    pub fn dec_websocket_clients(&self) {
        self.inner().websocket_clients.dec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_handle_is_shared() {
        let first = MonitorMetrics::new();
        let second = MonitorMetrics::new();

        first.observe_poll_cycle(0.05, 3);
        second.inc_websocket_clients();
        second.dec_websocket_clients();

        // Both handles resolve to the same registered instance
        assert!(std::ptr::eq(first.inner(), second.inner()));
    }
}

//! Metric value normalization for display
//!
//! Quantity strings reported by the cluster mix percentages, milli units
//! and binary suffixes. This module reduces milli-unit quantities to base
//! units with a fixed precision scheme so the UI renders stable values.

/// Normalize a metric value string for display, keyed by the metric name.
///
/// Percentages and anything belonging to a CPU-named metric pass through
/// unchanged; a value with a trailing `m` (milli) suffix is converted to
/// base units and reformatted. Everything else is returned verbatim.
pub fn normalize_metric_value(value: &str, metric_name: &str) -> String {
    if value.ends_with('%') || metric_name.to_lowercase().contains("cpu") {
        return value.to_string();
    }

    if let Some(stripped) = value.strip_suffix('m') {
        if let Ok(parsed) = stripped.parse::<f64>() {
            return format_base_units(parsed / 1000.0);
        }
    }

    value.to_string()
}

/// Three-tier precision: exact integers render bare, values of magnitude
/// ten or more get one decimal, everything smaller keeps two. The exact
/// widths are a UI contract.
fn format_base_units(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else if value.abs() >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

//! Current/target ratio derivation
//!
//! The ratio summarizes how far an autoscaler's primary metric sits from
//! its target. Branches are evaluated in a strict priority order; when no
//! branch resolves both sides numerically the ratio stays absent.

use crate::models::HpaStatus;

/// Binary quantity suffixes, stripped for parseability only. Exact string
/// match, first match in this order, no magnitude scaling.
const BINARY_SUFFIXES: [&str; 5] = ["Ki", "Mi", "Gi", "Ti", "Pi"];

/// Derive the current/target ratio for a status record.
///
/// Priority order: legacy CPU utilization, then direct percentage strings,
/// then the generic quantity parser. A zero or unparseable target yields
/// `None`, never zero.
pub fn calculate_ratio(status: &HpaStatus) -> Option<f64> {
    // Legacy CPU utilization wins when present; an absent current counts as 0
    if let Some(target_cpu) = status.target_cpu_utilization {
        if target_cpu > 0 {
            let current_cpu = status.current_cpu_utilization.unwrap_or(0);
            return Some(f64::from(current_cpu) / f64::from(target_cpu));
        }
    }

    let (current, target) = match (
        status.primary_metric_current.as_deref(),
        status.primary_metric_target.as_deref(),
    ) {
        (Some(current), Some(target)) => (current, target),
        _ => return None,
    };

    // Fast path for plain percentage pairs like "0%" / "60%"
    if let (Some(current_num), Some(target_num)) =
        (current.strip_suffix('%'), target.strip_suffix('%'))
    {
        if let (Ok(current_val), Ok(target_val)) =
            (current_num.parse::<f64>(), target_num.parse::<f64>())
        {
            if target_val > 0.0 {
                return Some(current_val / target_val);
            }
        }
    }

    let current_value = parse_metric_value(current)?;
    let target_value = parse_metric_value(target)?;
    if target_value > 0.0 {
        Some(current_value / target_value)
    } else {
        None
    }
}

/// Parse a quantity string down to a bare number for ratio math.
///
/// A trailing `%` or a single binary suffix is stripped without scaling;
/// otherwise a trailing `m` scales by 0.001 and a trailing `k` by 1000.
/// Only one suffix is ever trimmed. A remainder that fails to parse fails
/// the whole parse.
pub fn parse_metric_value(value: &str) -> Option<f64> {
    let mut value = value.trim();
    let mut multiplier = 1.0;

    if let Some(stripped) = value.strip_suffix('%') {
        value = stripped;
    } else if let Some(stripped) = BINARY_SUFFIXES
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix))
    {
        value = stripped;
    } else if let Some(stripped) = value.strip_suffix('m') {
        value = stripped;
        multiplier = 0.001;
    } else if let Some(stripped) = value.strip_suffix('k') {
        value = stripped;
        multiplier = 1000.0;
    }

    value.parse::<f64>().ok().map(|parsed| parsed * multiplier)
}

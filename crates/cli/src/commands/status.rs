//! Autoscaler status command

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

use crate::client::{ApiClient, HpaStatus};
use crate::output::{color_ratio, color_ready, print_warning, OutputFormat};

/// Row for the autoscaler status table
#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Namespace")]
    namespace: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Replicas")]
    replicas: String,
    #[tabled(rename = "Min-Max")]
    bounds: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Show status of all autoscalers, optionally filtered by namespace
pub async fn run(
    client: &ApiClient,
    namespace: Option<&str>,
    show_events: bool,
    format: OutputFormat,
) -> Result<()> {
    let statuses: Vec<HpaStatus> = client.get("api/hpa").await?;

    let filtered: Vec<_> = statuses
        .into_iter()
        .filter(|status| namespace.map(|ns| status.namespace == ns).unwrap_or(true))
        .collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&filtered)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if filtered.is_empty() {
                print_warning("No autoscalers found");
                return Ok(());
            }

            let rows: Vec<StatusRow> = filtered.iter().map(status_row).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);

            if show_events {
                for status in &filtered {
                    print_events(status);
                }
            }
        }
    }

    Ok(())
}

fn status_row(status: &HpaStatus) -> StatusRow {
    StatusRow {
        namespace: status.namespace.clone(),
        name: status.name.clone(),
        metric: status.primary_metric_name.clone(),
        current: status
            .primary_metric_current
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        target: status
            .primary_metric_target
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        ratio: color_ratio(status.ratio),
        replicas: format!("{}/{}", status.current_replicas, status.desired_replicas),
        bounds: format!("{}-{}", status.min_replicas, status.max_replicas),
        status: color_ready(status.ready),
    }
}

fn print_events(status: &HpaStatus) {
    if status.events.is_empty() {
        return;
    }

    println!("\nEvents for {}/{}:", status.namespace, status.name);
    for event in &status.events {
        println!(
            "  [{}] {} x{} ({}): {}",
            event.event_type, event.reason, event.count, event.last_timestamp, event.message
        );
    }
}

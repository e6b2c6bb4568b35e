//! Monitor health command

use anyhow::Result;

use crate::client::{ApiClient, Health};
use crate::output::{print_error, print_success};

/// Check monitor health
pub async fn run(client: &ApiClient) -> Result<()> {
    match client.get::<Health>("healthz").await {
        Ok(health) if health.status == "healthy" => {
            print_success("Monitor is healthy");
            Ok(())
        }
        Ok(health) => {
            print_error(&format!("Monitor reports status: {}", health.status));
            std::process::exit(1);
        }
        Err(error) => {
            print_error(&format!("Monitor is unreachable: {:#}", error));
            std::process::exit(1);
        }
    }
}

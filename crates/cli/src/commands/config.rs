//! Server configuration command

use anyhow::Result;

use crate::client::{ApiClient, ServerConfig};
use crate::output::OutputFormat;

/// Show the server configuration
pub async fn run(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let config: ServerConfig = client.get("api/config").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("WebSocket interval: {}s", config.websocket_interval);
            println!(
                "Tolerance:          {:.2} ({}%)",
                config.tolerance,
                config.tolerance * 100.0
            );
        }
    }

    Ok(())
}

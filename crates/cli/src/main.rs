//! HPA Monitor CLI
//!
//! A command-line client for the HPA Monitor REST API: autoscaler status
//! tables, server configuration and health checks.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, health, status};

/// HPA Monitor CLI
#[derive(Parser)]
#[command(name = "hpamon")]
#[command(author, version, about = "CLI for the HPA Monitor", long_about = None)]
pub struct Cli {
    /// Monitor API endpoint URL (can also be set via HPA_API_URL env var)
    #[arg(long, env = "HPA_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the status of all autoscalers in the cluster
    Status {
        /// Only show autoscalers in this namespace
        #[arg(long, short)]
        namespace: Option<String>,

        /// Show recent events under each autoscaler
        #[arg(long)]
        events: bool,
    },

    /// Show the server configuration
    Config,

    /// Check monitor health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = client::ApiClient::new(&cli.api_url)?;

    match cli.command {
        Commands::Status { namespace, events } => {
            status::run(&client, namespace.as_deref(), events, cli.format).await
        }
        Commands::Config => config::run(&client, cli.format).await,
        Commands::Health => health::run(&client).await,
    }
}

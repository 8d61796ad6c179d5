// rest_api/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lib::HostelStore;
use rest_api::{load_rest_api_config, start_server, AppState};

#[derive(Debug, Parser)]
#[command(name = "rest_api", version, about = "Hostel management REST API")]
struct Args {
    /// YAML configuration file (defaults to ./hostel.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    port: Option<u16>,
    /// Directory holding the sled database
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_rest_api_config(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_directory = data_dir;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = HostelStore::open(&config.data_directory)
        .with_context(|| format!("Failed to open storage at {}", config.data_directory.display()))?;
    let state = AppState::new(store, &config)?;

    start_server(&config, state, shutdown_signal()).await
}

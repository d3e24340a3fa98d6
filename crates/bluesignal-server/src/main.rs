//! BlueSignal Server
//!
//! Citizen flood-report intake, multi-stage verification, and real-time
//! SSE fan-out to operational dashboards.

use anyhow::Result;
use bluesignal_server::cli::Cli;
use bluesignal_server::config::ServerConfig;
use bluesignal_server::run_server;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ServerConfig::load(&cli.config, &cli)?;
    let addr: SocketAddr = config.bind.parse()?;
    let state = config.build_state();

    run_server(state, addr).await
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "bluesignal=debug,tower_http=debug"
    } else {
        "bluesignal=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! SWAPI Gateway
//!
//! Validates catalog requests and forwards each one as a single GET to the
//! SWAPI upstream.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  GATEWAY                      │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌──────────┐   │
//!   ─────────────────┼─▶│  http   │──▶│ catalog  │──▶│ upstream │───┼──▶ swapi.tech
//!                    │  │ server  │   │ validate │   │  client  │   │
//!                    │  └─────────┘   └──────────┘   └────┬─────┘   │
//!   Client Response  │  ┌─────────┐                       │         │
//!   ◀────────────────┼──│  error  │◀──────────────────────┘         │
//!                    │  │translate│                                  │
//!                    │  └─────────┘                                  │
//!                    │   config · observability · lifecycle          │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use swapi_gateway::config::{loader, load_config};
use swapi_gateway::http::GatewayServer;
use swapi_gateway::lifecycle::{signals, Shutdown};
use swapi_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "swapi-gateway", version, about = "Validating gateway for the SWAPI catalog")]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "SWAPI_GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = loader::load_dotenv();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(&config.observability)?;
    loader::log_dotenv(&dotenv);

    tracing::info!("swapi-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        upstream_timeout_ms = config.upstream.request_timeout_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation already checked the address.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(port = local_addr.port(), "Middleware server running on port {}", local_addr.port());

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::trigger_on_signal(shutdown));

    let server = GatewayServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

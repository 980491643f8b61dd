//! Routing gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                   GATEWAY                     │
//!                      │                                               │
//!  Client Request      │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!  ────────────────────┼─▶│   http   │──▶│   rate   │──▶│ routing  │  │
//!                      │  │  server  │   │ limiter  │   │  table   │  │
//!                      │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                      │                                      │        │
//!                      │                                      ▼        │
//!  Client Response     │  ┌──────────┐                 ┌──────────┐   │
//!  ◀───────────────────┼──│ response │◀────────────────│ upstream │◀──┼── Upstream
//!                      │  │ mapping  │                 │  client  │   │   (user-service)
//!                      │  └──────────┘                 └──────────┘   │
//!                      │                                               │
//!                      │  config · lifecycle · observability           │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use rag_gateway::config::{self, GatewayConfig};
use rag_gateway::http::HttpServer;
use rag_gateway::lifecycle::{self, Shutdown};
use rag_gateway::observability;

#[derive(Parser, Debug)]
#[command(name = "gateway", about = "Rate-limited routing gateway")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load_gateway_config(path)?,
        None => GatewayConfig::default(),
    };

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        replenish_rate = config.rate_limit.replenish_rate,
        burst_capacity = config.rate_limit.burst_capacity,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

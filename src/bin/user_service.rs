//! User service: the upstream the gateway fronts.
//!
//! Serves a health endpoint, a user info endpoint, and a
//! retrieval-augmented query endpoint over an in-memory document store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use rag_gateway::config::{self, ServiceConfig};
use rag_gateway::lifecycle::{self, Shutdown};
use rag_gateway::observability;
use rag_gateway::retrieval::{MemoryStore, QueryEngine};
use rag_gateway::service::ServiceServer;

#[derive(Parser, Debug)]
#[command(name = "user-service", about = "User service with a retrieval query endpoint")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load_service_config(path)?,
        None => ServiceConfig::default(),
    };

    observability::logging::init(&config.observability.log_level);

    let store = match &config.retrieval.corpus_path {
        Some(path) => MemoryStore::from_toml_file(Path::new(path))?,
        None => MemoryStore::new(),
    };

    tracing::info!(
        bind_address = %config.bind_address,
        documents = store.len(),
        top_k = config.retrieval.top_k,
        "Configuration loaded"
    );

    let engine = Arc::new(QueryEngine::new(Box::new(store), config.retrieval.top_k));

    let listener = TcpListener::bind(&config.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = ServiceServer::new(config, engine);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! ragd — retrieval-augmented answer daemon.
//!
//! # Usage
//!
//! ```bash
//! # Serve against a local Qdrant, falling back to memory if unreachable
//! cargo run --release
//!
//! # Force the in-memory backend
//! cargo run --release -- --memory-only
//! ```
//!
//! # Environment Variables
//!
//! - `RAGD_ADDR`: bind address (default: 0.0.0.0:8000)
//! - `RAGD_QDRANT_URL`: Qdrant REST endpoint (default: http://localhost:6333)
//! - `RAGD_COLLECTION`: collection name (default: demo_collection)
//! - `RAGD_MEMORY_ONLY`: skip the vector backend entirely
//! - `RUST_LOG`: logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use ragd::api::{create_app, ApiState};
use ragd::config::AppConfig;
use ragd::controller::Controller;
use ragd::embedding::Embedder;
use ragd::store::select_backend;
use ragd::workflow::RagWorkflow;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "ragd")]
#[command(about = "Retrieval-augmented answer daemon")]
struct CliArgs {
    /// Bind address (overrides RAGD_ADDR)
    #[arg(long)]
    addr: Option<String>,

    /// Qdrant REST endpoint (overrides RAGD_QDRANT_URL)
    #[arg(long)]
    qdrant_url: Option<String>,

    /// Collection name (overrides RAGD_COLLECTION)
    #[arg(long)]
    collection: Option<String>,

    /// Skip the vector backend and serve from memory
    #[arg(long)]
    memory_only: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = AppConfig::from_env();
    if let Some(addr) = args.addr {
        config.bind_addr = addr;
    }
    if let Some(url) = args.qdrant_url {
        config.qdrant_url = url;
    }
    if let Some(collection) = args.collection {
        config.collection = collection;
    }
    config.memory_only |= args.memory_only;

    info!("ragd — retrieval-augmented answer daemon");

    // Backend selection happens exactly once, before serving begins.
    let embedder = Embedder::new();
    let store = select_backend(&config, embedder).await;
    let workflow = Arc::new(RagWorkflow::new(store.clone()));
    let controller = Arc::new(Controller::new(workflow, store));

    let app = create_app(ApiState { controller });

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, shutting down...");
        shutdown_token.cancel();
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Serving on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel_token.cancelled().await })
        .await
        .context("server error")?;

    info!("Shutdown complete");
    Ok(())
}

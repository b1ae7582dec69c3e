//! minirag service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use minirag::api::{build_router, AppState};
use minirag::embedding::EmbeddingEngine;
use minirag::store::create_document_store;

#[derive(Parser, Debug)]
#[command(name = "minirag", version, about = "Retrieval-augmented answer service")]
struct Args {
    /// Qdrant endpoint (gRPC; the default Qdrant gRPC port is 6334)
    #[arg(long, env = "QDRANT_URL", default_value = "http://localhost:6334")]
    qdrant_url: String,

    /// Qdrant collection name
    #[arg(long, env = "QDRANT_COLLECTION", default_value = "documents")]
    collection: String,

    /// Embedding dimension
    #[arg(long, env = "EMBEDDING_DIMENSION", default_value_t = 128)]
    dimension: usize,

    /// Address to serve the HTTP API on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.dimension > 0, "embedding dimension must be at least 1");

    let embedder = Arc::new(EmbeddingEngine::new(args.dimension));
    let store = create_document_store(&args.qdrant_url, &args.collection, args.dimension).await;
    info!(
        "document store ready (durable: {}, dimension: {})",
        store.is_durable(),
        args.dimension
    );

    let state = Arc::new(AppState::new(embedder, store));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!("listening on {}", args.addr);
    axum::serve(listener, router).await?;

    Ok(())
}

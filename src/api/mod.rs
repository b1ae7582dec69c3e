//! HTTP surface: route registration and shared application state.
//!
//! Thin plumbing over the core pipeline; all decisions live in
//! [`crate::pipeline`] and [`crate::store`].

pub mod routes;
pub mod schemas;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::embedding::EmbeddingEngine;
use crate::pipeline::RagPipeline;
use crate::store::StoreHandle;

/// Shared state behind the HTTP handlers
pub struct AppState {
    pub pipeline: RagPipeline,
    pub embedder: Arc<EmbeddingEngine>,
    pub store: StoreHandle,
    doc_counter: AtomicU64,
}

impl AppState {
    pub fn new(embedder: Arc<EmbeddingEngine>, store: StoreHandle) -> Self {
        let pipeline = RagPipeline::new(Arc::clone(&embedder), store.store());
        Self {
            pipeline,
            embedder,
            store,
            doc_counter: AtomicU64::new(0),
        }
    }

    /// Next monotonically increasing document id. Ids are assigned here,
    /// never by the store.
    pub fn next_doc_id(&self) -> u64 {
        self.doc_counter.fetch_add(1, Ordering::Relaxed)
    }
}

/// Build the complete API router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", post(routes::ask_question))
        .route("/add", post(routes::add_document))
        .route("/status", get(routes::get_status))
        .route("/", get(routes::root))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

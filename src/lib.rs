//! minirag - minimal retrieval-augmented answer service
//!
//! Given a free-text question, retrieves semantically related stored
//! documents and composes an answer from them.
//!
//! # Architecture
//!
//! - **Embedding**: deterministic stand-in encoder (text -> fixed-length vector)
//! - **Store**: pluggable document store with a Qdrant backend and an
//!   in-memory fallback selected once at startup
//! - **Pipeline**: staged retrieve -> answer execution over a per-request context
//! - **API**: thin axum layer exposing ask/add/status endpoints

pub mod api;
pub mod embedding;
pub mod errors;
pub mod pipeline;
pub mod store;

// Re-export commonly used types
pub use embedding::EmbeddingEngine;
pub use errors::{RagError, Result};
pub use pipeline::{PipelineResult, RagPipeline};
pub use store::{create_document_store, DocumentStore, StoreHandle};

//! Document storage with a durable Qdrant backend and an in-memory fallback.
//!
//! The backend is chosen once at process start by [`create_document_store`]:
//! if the Qdrant collection cannot be initialized, the service degrades to
//! the volatile in-memory store. No runtime re-promotion is attempted.

pub mod memory;
pub mod qdrant;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::{RagError, Result};

pub use memory::InMemoryDocumentStore;
pub use qdrant::QdrantDocumentStore;

/// Storage abstraction shared by the durable and volatile backends
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a document under the caller-assigned id. Duplicate ids are
    /// accepted; dedup behavior is backend-defined.
    async fn add_document(&self, doc_id: u64, text: &str, embedding: &[f32]) -> Result<()>;

    /// Return up to `limit` stored texts, most relevant first. A `limit` of
    /// zero returns an empty sequence.
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<String>>;
}

/// The backend chosen at startup, recorded immutably for the process lifetime
pub struct StoreHandle {
    backend: Arc<dyn DocumentStore>,
    durable: bool,
    // Kept only for the status surface's document count
    volatile: Option<Arc<InMemoryDocumentStore>>,
}

impl StoreHandle {
    /// Handle over a connected durable backend
    pub fn durable(store: QdrantDocumentStore) -> Self {
        Self {
            backend: Arc::new(store),
            durable: true,
            volatile: None,
        }
    }

    /// Handle over a fresh in-memory fallback store
    pub fn volatile(dimension: usize) -> Self {
        let store = Arc::new(InMemoryDocumentStore::new(dimension));
        Self {
            backend: store.clone(),
            durable: false,
            volatile: Some(store),
        }
    }

    /// The active backend
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.backend)
    }

    /// Whether the durable backend is in use
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    /// Number of documents held by the volatile store (0 when durable)
    pub fn volatile_doc_count(&self) -> usize {
        self.volatile
            .as_ref()
            .map(|store| store.document_count())
            .unwrap_or(0)
    }
}

/// Construct the document store, preferring Qdrant.
///
/// One-shot decision at startup: any initialization failure is logged and
/// answered with the in-memory fallback. Never fails.
pub async fn create_document_store(url: &str, collection: &str, dimension: usize) -> StoreHandle {
    match QdrantDocumentStore::connect(url, collection, dimension).await {
        Ok(store) => {
            info!("Qdrant collection '{}' ready at {}", collection, url);
            StoreHandle::durable(store)
        }
        Err(err) => {
            warn!("Qdrant not available at {url}: {err}; falling back to in-memory store");
            StoreHandle::volatile(dimension)
        }
    }
}

pub(crate) fn check_dimension(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(RagError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

//! Volatile in-process document store.
//!
//! Fallback backend used when Qdrant is unreachable at startup. It performs
//! no vector comparison: `search` is a functional stub that returns the
//! earliest-inserted document, which keeps the pipeline usable in degraded
//! mode but is not similarity search. Contents are lost on process restart.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::errors::Result;
use crate::store::{check_dimension, DocumentStore};

/// Append-only in-memory store
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<String>>,
    dimension: usize,
}

impl InMemoryDocumentStore {
    pub fn new(dimension: usize) -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            dimension,
        }
    }

    /// Number of stored documents
    pub fn document_count(&self) -> usize {
        self.documents.read().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn add_document(&self, _doc_id: u64, text: &str, embedding: &[f32]) -> Result<()> {
        check_dimension(self.dimension, embedding.len())?;
        self.documents.write().unwrap().push(text.to_string());
        Ok(())
    }

    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<String>> {
        check_dimension(self.dimension, query_embedding.len())?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        // Stub: first-inserted document stands in for the nearest neighbor
        let documents = self.documents.read().unwrap();
        Ok(documents.first().cloned().into_iter().collect())
    }
}

//! Durable document store backed by a Qdrant collection.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    Value, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};

use crate::errors::{RagError, Result};
use crate::store::{check_dimension, DocumentStore};

// Bounds both connection setup and individual calls so an unreachable
// backend surfaces as BackendUnavailable instead of hanging
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const TEXT_PAYLOAD_KEY: &str = "text";

/// Document store delegating storage and nearest-neighbor search to Qdrant
pub struct QdrantDocumentStore {
    client: Qdrant,
    collection: String,
    dimension: usize,
}

impl std::fmt::Debug for QdrantDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantDocumentStore")
            .field("collection", &self.collection)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl QdrantDocumentStore {
    /// Connect to Qdrant and (re)create the collection with the configured
    /// dimension and cosine distance.
    pub async fn connect(url: &str, collection: &str, dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(RagError::InvalidInput(
                "embedding dimension must be at least 1".to_string(),
            ));
        }

        let client = Qdrant::from_url(url)
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(REQUEST_TIMEOUT)
            .build()?;

        if client.collection_exists(collection).await? {
            client.delete_collection(collection).await?;
        }
        client
            .create_collection(
                CreateCollectionBuilder::new(collection)
                    .vectors_config(VectorParamsBuilder::new(dimension as u64, Distance::Cosine)),
            )
            .await?;

        Ok(Self {
            client,
            collection: collection.to_string(),
            dimension,
        })
    }
}

#[async_trait]
impl DocumentStore for QdrantDocumentStore {
    async fn add_document(&self, doc_id: u64, text: &str, embedding: &[f32]) -> Result<()> {
        check_dimension(self.dimension, embedding.len())?;

        let mut payload = Payload::new();
        payload.insert(TEXT_PAYLOAD_KEY, text.to_string());

        let point = PointStruct::new(doc_id, embedding.to_vec(), payload);
        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]).wait(true))
            .await?;

        Ok(())
    }

    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<String>> {
        check_dimension(self.dimension, query_embedding.len())?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    &self.collection,
                    query_embedding.to_vec(),
                    limit as u64,
                )
                .with_payload(true),
            )
            .await?;

        Ok(response
            .result
            .into_iter()
            .filter_map(|point| payload_text(&point.payload))
            .collect())
    }
}

fn payload_text(payload: &HashMap<String, Value>) -> Option<String> {
    payload
        .get(TEXT_PAYLOAD_KEY)
        .and_then(|value| match &value.kind {
            Some(Kind::StringValue(text)) => Some(text.clone()),
            _ => None,
        })
}

//! Integration tests for the retrieval service.
//!
//! These run without a live Qdrant: the factory is pointed at an unreachable
//! endpoint and must degrade to the in-memory store. Tests that need a real
//! Qdrant are marked #[ignore].

use std::sync::Arc;

use minirag::pipeline::NO_KNOWLEDGE_ANSWER;
use minirag::store::create_document_store;
use minirag::{DocumentStore, EmbeddingEngine, RagPipeline};

// Nothing listens here; connection is refused immediately
const UNREACHABLE_QDRANT: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn test_factory_falls_back_without_raising() {
    let handle = create_document_store(UNREACHABLE_QDRANT, "documents", 128).await;

    assert!(!handle.is_durable());
    assert_eq!(handle.volatile_doc_count(), 0);
}

#[tokio::test]
async fn test_ask_with_empty_knowledge_base() {
    let handle = create_document_store(UNREACHABLE_QDRANT, "documents", 128).await;
    let embedder = Arc::new(EmbeddingEngine::new(128));
    let pipeline = RagPipeline::new(embedder, handle.store());

    let result = pipeline
        .execute("What is the capital of France?")
        .await
        .unwrap();

    assert!(result.context.is_empty());
    assert_eq!(result.answer, NO_KNOWLEDGE_ANSWER);
}

#[tokio::test]
async fn test_ask_after_adding_document() {
    let handle = create_document_store(UNREACHABLE_QDRANT, "documents", 128).await;
    let embedder = Arc::new(EmbeddingEngine::new(128));
    let store = handle.store();

    let text = "The capital of France is Paris.";
    let embedding = embedder.embed(text).unwrap();
    store.add_document(0, text, &embedding).await.unwrap();
    assert_eq!(handle.volatile_doc_count(), 1);

    let pipeline = RagPipeline::new(embedder, store);
    let result = pipeline
        .execute("What is the capital of France?")
        .await
        .unwrap();

    assert_eq!(result.context, vec![text.to_string()]);
    assert!(result.answer.contains("The capital of France is Paris."));
}

#[tokio::test]
async fn test_search_limit_zero_is_empty() {
    let handle = create_document_store(UNREACHABLE_QDRANT, "documents", 16).await;
    let embedder = EmbeddingEngine::new(16);
    let store = handle.store();

    let embedding = embedder.embed("stored").unwrap();
    store.add_document(0, "stored", &embedding).await.unwrap();

    let results = store.search(&embedding, 0).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
#[ignore] // Integration test - requires Qdrant at localhost:6334
async fn test_durable_backend_end_to_end() {
    let handle = create_document_store("http://localhost:6334", "minirag_it", 128).await;
    assert!(handle.is_durable());

    let embedder = Arc::new(EmbeddingEngine::new(128));
    let store = handle.store();

    let text = "The capital of France is Paris.";
    let embedding = embedder.embed(text).unwrap();
    store.add_document(0, text, &embedding).await.unwrap();

    let pipeline = RagPipeline::new(embedder, store);
    let result = pipeline
        .execute("What is the capital of France?")
        .await
        .unwrap();

    assert!(result.context.contains(&text.to_string()));
    assert!(result.answer.contains("Paris"));
}

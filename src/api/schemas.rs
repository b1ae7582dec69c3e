//! Request/response schemas for the HTTP surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// The question to ask the retrieval pipeline
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// The document text to add to the knowledge base
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: String,
    pub answer: String,
    /// Documents retrieved and used for answering
    pub context_used: Vec<String>,
    /// Processing time in seconds
    pub latency_sec: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    /// Identifier assigned to the stored document
    pub id: u64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether the durable Qdrant backend is in use
    pub durable_ready: bool,
    /// Documents held by the in-memory fallback (0 when durable)
    pub volatile_doc_count: usize,
    pub pipeline_ready: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

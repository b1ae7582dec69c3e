//! Error types for the retrieval pipeline and its storage backends.

use thiserror::Error;

/// Main error type for the retrieval service
#[derive(Error, Debug)]
pub enum RagError {
    /// Empty question/text or otherwise unusable input; surfaced to the
    /// caller as a client error
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The durable vector backend could not be reached. At startup this is
    /// absorbed by the store factory (fallback to the in-memory store); on a
    /// live call it propagates as a server error
    #[error("Vector backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Vector length does not match the configured embedding dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Result type alias for retrieval operations
pub type Result<T> = std::result::Result<T, RagError>;

impl From<qdrant_client::QdrantError> for RagError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        RagError::BackendUnavailable(err.to_string())
    }
}

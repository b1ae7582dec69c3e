//! HTTP handlers for ask/add/status.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::schemas::{
    DocumentRequest, DocumentResponse, ErrorResponse, QuestionRequest, QuestionResponse,
    ServiceInfo, StatusResponse,
};
use crate::api::AppState;
use crate::errors::RagError;
use crate::store::DocumentStore;

/// Wrapper mapping core errors onto HTTP statuses
#[derive(Debug)]
pub struct ApiError(RagError);

impl From<RagError> for ApiError {
    fn from(err: RagError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RagError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RagError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RagError::DimensionMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// POST /ask - run the retrieval pipeline on a question
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let started = Instant::now();
    let result = state.pipeline.execute(&request.question).await?;
    // Reported with millisecond precision
    let latency_sec = (started.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;

    Ok(Json(QuestionResponse {
        question: result.question,
        answer: result.answer,
        context_used: result.context,
        latency_sec,
    }))
}

/// POST /add - embed and store a document
pub async fn add_document(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DocumentRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    if request.text.is_empty() {
        return Err(RagError::InvalidInput("document text cannot be empty".to_string()).into());
    }

    let embedding = state.embedder.embed(&request.text)?;
    let doc_id = state.next_doc_id();
    state
        .store
        .store()
        .add_document(doc_id, &request.text, &embedding)
        .await?;

    Ok(Json(DocumentResponse {
        id: doc_id,
        status: "added".to_string(),
    }))
}

/// GET /status - backend choice and degraded-mode document count
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        durable_ready: state.store.is_durable(),
        volatile_doc_count: state.store.volatile_doc_count(),
        pipeline_ready: true,
    })
}

/// GET / - health check
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "minirag retrieval service".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingEngine;
    use crate::store::StoreHandle;

    fn volatile_state(dimension: usize) -> Arc<AppState> {
        Arc::new(AppState::new(
            Arc::new(EmbeddingEngine::new(dimension)),
            StoreHandle::volatile(dimension),
        ))
    }

    #[tokio::test]
    async fn test_add_then_ask() {
        let state = volatile_state(128);

        let added = add_document(
            State(state.clone()),
            Json(DocumentRequest {
                text: "The capital of France is Paris.".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(added.0.id, 0);
        assert_eq!(added.0.status, "added");

        let response = ask_question(
            State(state),
            Json(QuestionRequest {
                question: "What is the capital of France?".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(
            response.0.context_used,
            vec!["The capital of France is Paris.".to_string()]
        );
        assert!(response.0.answer.contains("Paris"));
        assert!(response.0.latency_sec >= 0.0);
    }

    #[tokio::test]
    async fn test_empty_question_is_client_error() {
        let state = volatile_state(128);

        let err = ask_question(
            State(state),
            Json(QuestionRequest {
                question: String::new(),
            }),
        )
        .await
        .err()
        .unwrap();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_document_is_client_error() {
        let state = volatile_state(128);

        let err = add_document(
            State(state.clone()),
            Json(DocumentRequest {
                text: String::new(),
            }),
        )
        .await
        .err()
        .unwrap();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        // No store mutation on invalid input
        assert_eq!(state.store.volatile_doc_count(), 0);
    }

    #[tokio::test]
    async fn test_status_reports_fallback() {
        let state = volatile_state(128);

        add_document(
            State(state.clone()),
            Json(DocumentRequest {
                text: "one".to_string(),
            }),
        )
        .await
        .unwrap();

        let status = get_status(State(state)).await;
        assert!(!status.0.durable_ready);
        assert_eq!(status.0.volatile_doc_count, 1);
        assert!(status.0.pipeline_ready);
    }

    #[tokio::test]
    async fn test_root_health() {
        let info = root().await;
        assert_eq!(info.0.status, "running");
        assert!(!info.0.version.is_empty());
    }
}

//! Staged retrieval pipeline: retrieve -> answer.
//!
//! Each stage is a transform over a per-request [`PipelineContext`]. Keeping
//! retrieval separate from answer composition lets either stage be replaced
//! independently, e.g. swapping `answer` for an LLM call without touching
//! retrieval.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingEngine;
use crate::errors::{RagError, Result};
use crate::store::DocumentStore;

/// How many documents a retrieval pulls in. Tunable, not architectural.
pub const DEFAULT_RETRIEVAL_WIDTH: usize = 2;

/// Answer returned when retrieval found nothing
pub const NO_KNOWLEDGE_ANSWER: &str = "Sorry, I don't know.";

// Longest quotation taken from a retrieved document
const ANSWER_PREVIEW_CHARS: usize = 100;

/// Per-request state threaded through the pipeline stages. Owned by exactly
/// one `execute` call, never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineContext {
    pub question: String,
    pub context: Vec<String>,
    pub answer: Option<String>,
}

impl PipelineContext {
    fn new(question: &str) -> Self {
        Self {
            question: question.to_string(),
            context: Vec::new(),
            answer: None,
        }
    }
}

/// Final pipeline output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub question: String,
    pub answer: String,
    pub context: Vec<String>,
}

/// Two-stage retrieval pipeline composed from an embedder and a store
pub struct RagPipeline {
    embedder: Arc<EmbeddingEngine>,
    store: Arc<dyn DocumentStore>,
    retrieval_width: usize,
}

impl RagPipeline {
    pub fn new(embedder: Arc<EmbeddingEngine>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            embedder,
            store,
            retrieval_width: DEFAULT_RETRIEVAL_WIDTH,
        }
    }

    /// Create with a custom retrieval width
    pub fn with_retrieval_width(
        embedder: Arc<EmbeddingEngine>,
        store: Arc<dyn DocumentStore>,
        retrieval_width: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            retrieval_width,
        }
    }

    /// Stage 1: embed the question and pull related documents into the context
    async fn retrieve(&self, ctx: &mut PipelineContext) -> Result<()> {
        let query_embedding = self.embedder.embed(&ctx.question)?;
        ctx.context = self
            .store
            .search(&query_embedding, self.retrieval_width)
            .await?;
        Ok(())
    }

    /// Stage 2: derive the answer from the retrieved context
    fn answer(&self, ctx: &mut PipelineContext) {
        let answer = match ctx.context.first() {
            Some(hit) => {
                let preview: String = hit.chars().take(ANSWER_PREVIEW_CHARS).collect();
                format!("I found this: '{preview}...'")
            }
            None => NO_KNOWLEDGE_ANSWER.to_string(),
        };
        ctx.answer = Some(answer);
    }

    /// Run retrieve then answer in strict sequence.
    ///
    /// Fails with [`RagError::InvalidInput`] on an empty question.
    pub async fn execute(&self, question: &str) -> Result<PipelineResult> {
        if question.is_empty() {
            return Err(RagError::InvalidInput(
                "question cannot be empty".to_string(),
            ));
        }

        let mut ctx = PipelineContext::new(question);
        self.retrieve(&mut ctx).await?;
        self.answer(&mut ctx);

        Ok(PipelineResult {
            question: ctx.question,
            answer: ctx.answer.unwrap_or_else(|| NO_KNOWLEDGE_ANSWER.to_string()),
            context: ctx.context,
        })
    }
}

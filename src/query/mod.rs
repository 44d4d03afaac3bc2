//! Keyword search over the indexed catalog
//!
//! A query embeds the keyword, retrieves the closest course documents and
//! asks the generation model to present them. Any failure along the way is
//! turned into a polite apology by [`CourseSearch::answer`].

use crate::index::{IndexError, ScoredDocument, VectorStore};
use crate::llm::{course_search_prompt, Embedder, Generator, LlmError};
use std::sync::Arc;
use thiserror::Error;

/// Number of documents retrieved per query unless configured otherwise
pub const DEFAULT_TOP_K: usize = 5;

/// Reply for a missing or whitespace-only keyword
pub const BLANK_KEYWORD_MESSAGE: &str =
    "Please provide a valid keyword to search for the courses and upscale your knowledge.";

/// Errors raised while answering a query
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to embed query: {0}")]
    Embedding(#[source] LlmError),

    #[error("failed to search index: {0}")]
    Index(#[from] IndexError),

    #[error("failed to generate answer: {0}")]
    Generation(#[source] LlmError),
}

/// Builds the fallback reply for a failed query
pub fn apology(error: &QueryError) -> String {
    format!(
        "Sorry, I am unable to find the answer to your query. Please try again later. The error is {}",
        error
    )
}

/// Returns true if the keyword should not be searched at all
pub fn is_blank(keyword: &str) -> bool {
    keyword.trim().is_empty()
}

/// Retrieval plus generation over explicit collaborators
#[derive(Clone)]
pub struct CourseSearch {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    generator: Arc<dyn Generator>,
    top_k: usize,
}

impl CourseSearch {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            embedder,
            store,
            generator,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Finds the `top_k` documents closest to `keyword`
    pub async fn retrieve(&self, keyword: &str) -> Result<Vec<ScoredDocument>, QueryError> {
        let embedding = self
            .embedder
            .embed_query(keyword)
            .await
            .map_err(QueryError::Embedding)?;

        let hits = self.store.search(&embedding, self.top_k)?;
        tracing::debug!("Retrieved {} documents for {:?}", hits.len(), keyword);
        Ok(hits)
    }

    /// Retrieves and generates, surfacing any failure
    pub async fn try_answer(&self, keyword: &str) -> Result<String, QueryError> {
        let hits = self.retrieve(keyword).await?;
        let documents: Vec<String> = hits.into_iter().map(|hit| hit.document.content).collect();
        let prompt = course_search_prompt(keyword, &documents);

        self.generator
            .generate(&prompt)
            .await
            .map_err(QueryError::Generation)
    }

    /// Answers `keyword`, replacing any failure with an apology
    pub async fn answer(&self, keyword: &str) -> String {
        match self.try_answer(keyword).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Query {:?} failed: {}", keyword, e);
                apology(&e)
            }
        }
    }
}

//! Vector store trait and error types

use crate::index::{Document, IngestRun, ScoredDocument};
use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Got {documents} documents but {embeddings} embeddings")]
    LengthMismatch { documents: usize, embeddings: usize },

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Index connection lock was poisoned")]
    Poisoned,
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Trait for vector store backends
///
/// Implementations own their synchronization so a single store can be
/// shared between request handlers behind an `Arc`.
pub trait VectorStore: Send + Sync {
    /// Replaces every stored document with `documents`
    ///
    /// # Arguments
    ///
    /// * `documents` - The documents to store
    /// * `embeddings` - One embedding per document, in the same order
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The new set is stored and the previous one is gone
    /// * `Err(IndexError)` - Nothing was changed
    fn replace_all(&self, documents: &[Document], embeddings: &[Vec<f32>]) -> IndexResult<()>;

    /// Returns up to `k` documents most similar to `query`, best first
    fn search(&self, query: &[f32], k: usize) -> IndexResult<Vec<ScoredDocument>>;

    /// Number of stored documents
    fn count(&self) -> IndexResult<u64>;

    /// Records a completed ingestion and returns its id
    fn record_ingest(
        &self,
        config_hash: &str,
        document_count: u64,
        dimensions: usize,
    ) -> IndexResult<i64>;

    /// Gets the most recent ingestion, if any
    fn latest_ingest(&self) -> IndexResult<Option<IngestRun>>;
}

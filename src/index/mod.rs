//! Vector index for crawled courses
//!
//! This module turns course records into searchable documents and keeps
//! them in a local vector store:
//! - Document conversion (content string, metadata, stable id)
//! - SQLite storage of documents and their embeddings
//! - Batched re-ingestion of a complete crawl result

mod document;
mod ingest;
mod schema;
mod sqlite;
mod traits;

pub use document::{document_id, to_document};
pub use ingest::{IngestError, IngestReport, Ingestor, DEFAULT_EMBED_BATCH_SIZE};
pub use sqlite::SqliteVectorStore;
pub use traits::{IndexError, IndexResult, VectorStore};

use serde::{Deserialize, Serialize};

/// Metadata stored alongside a course document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub url: String,
}

/// A course rendered as a single indexable text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Hex-encoded SHA-256 of the course url
    pub id: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// A document returned from a similarity search
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: Document,
    /// Cosine similarity to the query embedding
    pub score: f32,
}

/// Bookkeeping for one completed ingestion
#[derive(Debug, Clone)]
pub struct IngestRun {
    pub id: i64,
    pub ingested_at: String,
    pub config_hash: String,
    pub document_count: u64,
    pub dimensions: usize,
}

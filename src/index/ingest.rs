//! Re-ingestion of a crawl result into the vector store

use crate::course::CourseRecord;
use crate::index::traits::{IndexError, VectorStore};
use crate::index::{to_document, Document};
use crate::llm::{Embedder, LlmError};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Default number of documents per embedding request
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 100;

/// Errors that can occur while re-ingesting courses
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Embedding failed: {0}")]
    Embedding(#[from] LlmError),

    #[error("Index update failed: {0}")]
    Index(#[from] IndexError),

    #[error("Embedder returned {actual} vectors for {expected} documents")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Summary of one reindex
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Documents stored (after removing duplicate urls)
    pub documents: usize,
    /// Records dropped because their url was already seen
    pub duplicates: usize,
    /// Embedding requests made
    pub batches: usize,
    /// Id of the recorded ingest run, if the index was replaced
    pub run_id: Option<i64>,
}

/// Replaces the index contents with a fresh crawl result
pub struct Ingestor {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    batch_size: usize,
    config_hash: String,
}

impl Ingestor {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            batch_size: DEFAULT_EMBED_BATCH_SIZE,
            config_hash: String::new(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Hash of the configuration the crawl ran with, stored with the run
    pub fn with_config_hash(mut self, config_hash: impl Into<String>) -> Self {
        self.config_hash = config_hash.into();
        self
    }

    /// Embeds every record and atomically replaces the stored set
    ///
    /// All embeddings are computed before the store is touched, so a failed
    /// embedding request leaves the previous index in place. An empty record
    /// set is a no-op.
    ///
    /// # Arguments
    ///
    /// * `records` - The complete crawl result
    ///
    /// # Returns
    ///
    /// * `Ok(IngestReport)` - What was stored
    /// * `Err(IngestError)` - Embedding or storage failed
    pub async fn reindex(&self, records: &[CourseRecord]) -> Result<IngestReport, IngestError> {
        if records.is_empty() {
            tracing::warn!("No course records to ingest, leaving index untouched");
            return Ok(IngestReport::default());
        }

        let (documents, duplicates) = dedup_documents(records);
        if duplicates > 0 {
            tracing::info!("Dropped {} records with duplicate urls", duplicates);
        }

        let mut embeddings = Vec::with_capacity(documents.len());
        let mut batches = 0;
        for chunk in documents.chunks(self.batch_size) {
            let texts: Vec<String> = chunk.iter().map(|d| d.content.clone()).collect();
            let vectors = self.embedder.embed_documents(&texts).await?;
            if vectors.len() != texts.len() {
                return Err(IngestError::DimensionMismatch {
                    expected: texts.len(),
                    actual: vectors.len(),
                });
            }
            embeddings.extend(vectors);
            batches += 1;
            tracing::debug!(
                "Embedded batch {} ({} documents) with {}",
                batches,
                texts.len(),
                self.embedder.model_name()
            );
        }

        let dimensions = embeddings.first().map(Vec::len).unwrap_or(0);
        self.store.replace_all(&documents, &embeddings)?;
        let run_id =
            self.store
                .record_ingest(&self.config_hash, documents.len() as u64, dimensions)?;

        tracing::info!(
            "Indexed {} courses ({} dimensions, run {})",
            documents.len(),
            dimensions,
            run_id
        );

        Ok(IngestReport {
            documents: documents.len(),
            duplicates,
            batches,
            run_id: Some(run_id),
        })
    }
}

/// Converts records to documents, keeping the first record per url
fn dedup_documents(records: &[CourseRecord]) -> (Vec<Document>, usize) {
    let mut seen = HashSet::new();
    let mut documents = Vec::with_capacity(records.len());
    for record in records {
        let document = to_document(record);
        if seen.insert(document.id.clone()) {
            documents.push(document);
        }
    }
    let duplicates = records.len() - documents.len();
    (documents, duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SqliteVectorStore;
    use crate::llm::fake::{letter_vector, LetterEmbedder};

    fn record(title: &str) -> CourseRecord {
        CourseRecord {
            title: title.to_string(),
            url: format!("https://site.test/courses/{}", title.to_lowercase()),
            description: format!("About {}", title),
            curriculum: vec!["Intro".to_string()],
        }
    }

    fn setup() -> (Arc<LetterEmbedder>, Arc<SqliteVectorStore>) {
        (
            Arc::new(LetterEmbedder::default()),
            Arc::new(SqliteVectorStore::new_in_memory().unwrap()),
        )
    }

    #[tokio::test]
    async fn test_reindex_stores_all_records() {
        let (embedder, store) = setup();
        let ingestor = Ingestor::new(embedder.clone(), store.clone())
            .with_batch_size(2)
            .with_config_hash("abc");

        let records = vec![record("Python"), record("Excel"), record("Statistics")];
        let report = ingestor.reindex(&records).await.unwrap();

        assert_eq!(report.documents, 3);
        assert_eq!(report.batches, 2);
        assert_eq!(embedder.document_calls(), 2);
        assert_eq!(store.count().unwrap(), 3);

        let run = store.latest_ingest().unwrap().unwrap();
        assert_eq!(Some(run.id), report.run_id);
        assert_eq!(run.config_hash, "abc");
        assert_eq!(run.dimensions, 26);

        let hits = store
            .search(&letter_vector(&to_document(&records[1]).content), 1)
            .unwrap();
        assert_eq!(hits[0].document.metadata.url, records[1].url);
    }

    #[tokio::test]
    async fn test_reindex_replaces_previous_contents() {
        let (embedder, store) = setup();
        let ingestor = Ingestor::new(embedder, store.clone());

        ingestor
            .reindex(&[record("Old"), record("Older")])
            .await
            .unwrap();
        ingestor.reindex(&[record("Fresh")]).await.unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let hits = store.search(&letter_vector("fresh"), 5).unwrap();
        assert_eq!(hits[0].document.metadata.url, "https://site.test/courses/fresh");
    }

    #[tokio::test]
    async fn test_empty_records_leave_index_untouched() {
        let (embedder, store) = setup();
        let ingestor = Ingestor::new(embedder.clone(), store.clone());
        ingestor.reindex(&[record("Kept")]).await.unwrap();

        let report = ingestor.reindex(&[]).await.unwrap();
        assert_eq!(report, IngestReport::default());
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(embedder.document_calls(), 1);
    }

    #[tokio::test]
    async fn test_embedding_failure_keeps_old_index() {
        let store = Arc::new(SqliteVectorStore::new_in_memory().unwrap());
        Ingestor::new(Arc::new(LetterEmbedder::default()), store.clone())
            .reindex(&[record("Kept")])
            .await
            .unwrap();

        let result = Ingestor::new(Arc::new(LetterEmbedder::failing()), store.clone())
            .reindex(&[record("Lost")])
            .await;

        assert!(matches!(
            result,
            Err(IngestError::Embedding(LlmError::RateLimit))
        ));
        assert_eq!(store.count().unwrap(), 1);
        let hits = store.search(&letter_vector("kept"), 1).unwrap();
        assert_eq!(hits[0].document.metadata.url, "https://site.test/courses/kept");
    }

    #[tokio::test]
    async fn test_duplicate_urls_are_stored_once() {
        let (embedder, store) = setup();
        let ingestor = Ingestor::new(embedder, store.clone());

        let report = ingestor
            .reindex(&[record("Python"), record("SQL"), record("Python")])
            .await
            .unwrap();

        assert_eq!(report.documents, 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(store.count().unwrap(), 2);
    }
}

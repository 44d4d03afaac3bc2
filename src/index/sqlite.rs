//! SQLite vector store
//!
//! Embeddings are stored as little-endian `f32` blobs and searched by
//! brute-force cosine similarity, which is plenty for a catalog of a few
//! hundred courses.

use crate::index::schema::initialize_schema;
use crate::index::traits::{IndexError, IndexResult, VectorStore};
use crate::index::{Document, DocumentMetadata, IngestRun, ScoredDocument};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::cmp::Ordering;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed vector store
pub struct SqliteVectorStore {
    conn: Mutex<Connection>,
}

impl SqliteVectorStore {
    /// Opens or creates the index database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file; missing parent
    ///   directories are created
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteVectorStore)` - Successfully opened/created database
    /// * `Err(IndexError)` - Failed to open database
    pub fn new(path: &Path) -> IndexResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;
        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory store
    pub fn new_in_memory() -> IndexResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> IndexResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| IndexError::Poisoned)
    }
}

impl VectorStore for SqliteVectorStore {
    fn replace_all(&self, documents: &[Document], embeddings: &[Vec<f32>]) -> IndexResult<()> {
        if documents.len() != embeddings.len() {
            return Err(IndexError::LengthMismatch {
                documents: documents.len(),
                embeddings: embeddings.len(),
            });
        }
        if let Some(first) = embeddings.first() {
            if let Some(bad) = embeddings.iter().find(|e| e.len() != first.len()) {
                return Err(IndexError::DimensionMismatch {
                    expected: first.len(),
                    actual: bad.len(),
                });
            }
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM embeddings", [])?;
        tx.execute("DELETE FROM documents", [])?;

        {
            let mut insert_doc = tx.prepare(
                "INSERT INTO documents (id, position, content, metadata) VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut insert_vec = tx.prepare(
                "INSERT INTO embeddings (document_id, dimensions, vector) VALUES (?1, ?2, ?3)",
            )?;

            for (position, (document, embedding)) in documents.iter().zip(embeddings).enumerate()
            {
                let metadata = serde_json::to_string(&document.metadata)?;
                insert_doc.execute(params![
                    document.id,
                    position as i64,
                    document.content,
                    metadata
                ])?;
                insert_vec.execute(params![
                    document.id,
                    embedding.len() as i64,
                    serialize_embedding(embedding)
                ])?;
            }
        }

        tx.commit()?;
        tracing::debug!("Stored {} documents in index", documents.len());
        Ok(())
    }

    fn search(&self, query: &[f32], k: usize) -> IndexResult<Vec<ScoredDocument>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT d.id, d.content, d.metadata, e.vector
             FROM documents d JOIN embeddings e ON e.document_id = d.id
             ORDER BY d.position",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut scored = Vec::with_capacity(rows.len());
        for (id, content, metadata, blob) in rows {
            let embedding = deserialize_embedding(&blob);
            if embedding.len() != query.len() {
                return Err(IndexError::DimensionMismatch {
                    expected: embedding.len(),
                    actual: query.len(),
                });
            }

            let metadata: DocumentMetadata = serde_json::from_str(&metadata)?;
            scored.push(ScoredDocument {
                score: cosine_similarity(query, &embedding),
                document: Document {
                    id,
                    content,
                    metadata,
                },
            });
        }

        // Stable sort keeps ingestion order among equal scores
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    fn count(&self) -> IndexResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn record_ingest(
        &self,
        config_hash: &str,
        document_count: u64,
        dimensions: usize,
    ) -> IndexResult<i64> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO ingest_runs (ingested_at, config_hash, document_count, dimensions)
             VALUES (?1, ?2, ?3, ?4)",
            params![now, config_hash, document_count as i64, dimensions as i64],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn latest_ingest(&self) -> IndexResult<Option<IngestRun>> {
        let conn = self.lock()?;
        let run = conn
            .query_row(
                "SELECT id, ingested_at, config_hash, document_count, dimensions
                 FROM ingest_runs ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    Ok(IngestRun {
                        id: row.get(0)?,
                        ingested_at: row.get(1)?,
                        config_hash: row.get(2)?,
                        document_count: row.get::<_, i64>(3)? as u64,
                        dimensions: row.get::<_, i64>(4)? as usize,
                    })
                },
            )
            .optional()?;
        Ok(run)
    }
}

fn serialize_embedding(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn deserialize_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = (norm_a * norm_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}

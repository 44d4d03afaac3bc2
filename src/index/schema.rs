//! Database schema for the course index

/// SQL schema for the index database
pub const SCHEMA_SQL: &str = r#"
-- Course documents in ingestion order
CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    position INTEGER NOT NULL,
    content TEXT NOT NULL,
    metadata TEXT NOT NULL
);

-- One embedding per document, little-endian f32 values
CREATE TABLE IF NOT EXISTS embeddings (
    document_id TEXT PRIMARY KEY REFERENCES documents(id) ON DELETE CASCADE,
    dimensions INTEGER NOT NULL,
    vector BLOB NOT NULL
);

-- Completed ingestions
CREATE TABLE IF NOT EXISTS ingest_runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ingested_at TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    document_count INTEGER NOT NULL,
    dimensions INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_documents_position ON documents(position);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

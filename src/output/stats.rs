use crate::index::IngestRun;

/// Formats index statistics for the `stats` command
pub fn format_index_stats(document_count: u64, latest: Option<&IngestRun>) -> String {
    let mut out = String::from("=== Index Statistics ===\n\n");
    out.push_str(&format!("  Documents: {}\n", document_count));

    match latest {
        Some(run) => {
            out.push_str(&format!("  Last ingest: run {} at {}\n", run.id, run.ingested_at));
            out.push_str(&format!("  Documents in run: {}\n", run.document_count));
            out.push_str(&format!("  Embedding dimensions: {}\n", run.dimensions));
            if !run.config_hash.is_empty() {
                out.push_str(&format!("  Config hash: {}\n", run.config_hash));
            }
        }
        None => out.push_str("  No ingest runs recorded\n"),
    }

    out
}

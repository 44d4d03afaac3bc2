//! Output module for crawl reports and exports
//!
//! This module handles:
//! - The per-course console report printed after a crawl
//! - JSON export and re-import of crawl results
//! - Index statistics for the `stats` command

mod json;
mod report;
mod stats;

pub use json::{read_json, write_json};
pub use report::{format_course_report, format_crawl_summary};
pub use stats::format_index_stats;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

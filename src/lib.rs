//! Course-Scout: a course catalog crawler and keyword search service
//!
//! This crate crawls a paginated course catalog, extracts structured course
//! records from each detail page, indexes them into a vector store, and answers
//! free-text keyword queries through a language model behind a small HTTP API.

pub mod config;
pub mod course;
pub mod crawler;
pub mod extract;
pub mod index;
pub mod llm;
pub mod output;
pub mod query;
pub mod server;

use thiserror::Error;

/// Main error type for Course-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] index::IngestError),

    #[error("LLM error: {0}")]
    Llm(#[from] llm::LlmError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Course-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use course::{CourseDetails, CourseRecord};
pub use crawler::{CrawlOutcome, Paginator, Termination};
pub use extract::{extract_course, normalize};
pub use query::CourseSearch;

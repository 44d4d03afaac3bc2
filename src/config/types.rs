use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Course-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// What to do when a single course detail page cannot be fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailFailurePolicy {
    /// Abandon the rest of the listing page and end the crawl
    #[default]
    Abort,

    /// Log the failure, drop that course and keep going
    Skip,
}

/// Catalog crawl configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Catalog listing URL; `page=<n>` is appended per page
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Origin prepended to the relative course links found on listing pages
    #[serde(rename = "site-origin")]
    pub site_origin: String,

    /// Pause after each non-empty listing page (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Maximum number of detail pages fetched at once within a listing page
    #[serde(rename = "detail-concurrency", default = "default_detail_concurrency")]
    pub detail_concurrency: usize,

    #[serde(rename = "on-detail-error", default)]
    pub on_detail_error: DetailFailurePolicy,
}

impl CrawlerConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Vector index configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Path to the SQLite database holding documents and embeddings
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// Number of documents retrieved per query
    #[serde(rename = "top-k", default = "default_top_k")]
    pub top_k: usize,

    /// Number of documents sent per embedding request
    #[serde(rename = "embed-batch-size", default = "default_embed_batch_size")]
    pub embed_batch_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            top_k: default_top_k(),
            embed_batch_size: default_embed_batch_size(),
        }
    }
}

/// Language model service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "base-url", default = "default_llm_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(rename = "embedding-model", default = "default_embedding_model")]
    pub embedding_model: String,

    #[serde(rename = "generation-model", default = "default_generation_model")]
    pub generation_model: String,

    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key_env: default_api_key_env(),
            embedding_model: default_embedding_model(),
            generation_model: default_generation_model(),
            temperature: None,
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_page_delay_ms() -> u64 {
    2000
}

fn default_detail_concurrency() -> usize {
    1
}

fn default_database_path() -> String {
    "./courses.db".to_string()
}

fn default_top_k() -> usize {
    5
}

fn default_embed_batch_size() -> usize {
    100
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-004".to_string()
}

fn default_generation_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

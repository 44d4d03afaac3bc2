use crate::llm::Prompt;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("Content blocked by safety filters")]
    Blocked,
}

pub type LlmResult<T> = Result<T, LlmError>;

/// Turns text into embedding vectors
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed texts that will be stored in the index, one vector per text
    async fn embed_documents(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>>;

    /// Embed a search query
    async fn embed_query(&self, text: &str) -> LlmResult<Vec<f32>>;

    fn model_name(&self) -> &str;
}

/// Produces a text answer for a prompt
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> LlmResult<String>;

    fn model_name(&self) -> &str;
}

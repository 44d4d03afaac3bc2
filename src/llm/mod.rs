//! Language model collaborators: embeddings, generation and the prompt
//! used to turn retrieved courses into an answer.

mod gemini;
mod prompt;
mod traits;

#[cfg(test)]
pub(crate) mod fake;

pub use gemini::GeminiClient;
pub use prompt::{course_search_prompt, Prompt, DOCUMENT_SEPARATOR};
pub use traits::{Embedder, Generator, LlmError, LlmResult};

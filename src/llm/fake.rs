//! Deterministic language model stand-ins for unit tests

use crate::llm::{Embedder, Generator, LlmError, LlmResult, Prompt};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Embeds text as normalized letter frequencies (26 dimensions)
#[derive(Default)]
pub(crate) struct LetterEmbedder {
    pub(crate) fail: bool,
    pub(crate) document_calls: AtomicUsize,
    pub(crate) query_calls: AtomicUsize,
}

impl LetterEmbedder {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn document_calls(&self) -> usize {
        self.document_calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn letter_vector(text: &str) -> Vec<f32> {
    let mut counts = vec![0.0f32; 26];
    for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
        counts[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
    }
    let norm = counts.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        counts.iter_mut().for_each(|v| *v /= norm);
    }
    counts
}

#[async_trait]
impl Embedder for LetterEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>> {
        self.document_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LlmError::RateLimit);
        }
        Ok(texts.iter().map(|t| letter_vector(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> LlmResult<Vec<f32>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LlmError::RateLimit);
        }
        Ok(letter_vector(text))
    }

    fn model_name(&self) -> &str {
        "letters"
    }
}

/// Answers with the keyword turn and the number of stuffed documents
#[derive(Default)]
pub(crate) struct EchoGenerator {
    pub(crate) fail: bool,
    pub(crate) prompts: Mutex<Vec<Prompt>>,
}

impl EchoGenerator {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Generator for EchoGenerator {
    async fn generate(&self, prompt: &Prompt) -> LlmResult<String> {
        self.prompts.lock().unwrap().push(prompt.clone());
        if self.fail {
            return Err(LlmError::Api {
                status: 500,
                message: "model overloaded".to_string(),
            });
        }
        Ok(format!("echo: {}", prompt.human.first().cloned().unwrap_or_default()))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

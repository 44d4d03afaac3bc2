use crate::config::LlmConfig;
use crate::llm::traits::{Embedder, Generator, LlmError, LlmResult};
use crate::llm::Prompt;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    content: Content,
    task_type: &'static str,
}

#[derive(Debug, Serialize)]
struct BatchEmbedRequest {
    requests: Vec<EmbedRequest>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// Google Gemini API client.
///
/// Serves both embeddings and text generation. Requires a valid API key and
/// internet access.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    embedding_model: String,
    generation_model: String,
    temperature: Option<f32>,
}

impl GeminiClient {
    /// Create a new client against `base_url` (e.g. `.../v1beta`).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        embedding_model: impl Into<String>,
        generation_model: impl Into<String>,
    ) -> LlmResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            embedding_model: embedding_model.into(),
            generation_model: generation_model.into(),
            temperature: None,
        })
    }

    /// Create a client from config, reading the API key from the environment.
    pub fn from_config(config: &LlmConfig) -> LlmResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(config.api_key_env.clone()))?;

        let mut client = Self::new(
            &config.base_url,
            api_key,
            &config.embedding_model,
            &config.generation_model,
        )?;
        client.temperature = config.temperature;
        Ok(client)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/{}:{}", self.base_url, model_path(model), method)
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> LlmResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        tracing::debug!("Sending Gemini request to: {}", url);

        let resp = self
            .client
            .post(url)
            .query(&[("key", &self.api_key)])
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => LlmError::RateLimit,
                code => LlmError::Api {
                    status: code,
                    message,
                },
            });
        }

        resp.json::<R>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse Gemini response: {}", e)))
    }
}

/// Gemini expects `models/<name>`; accept either form in config.
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

fn text_content(text: &str) -> Content {
    Content {
        role: None,
        parts: vec![Part {
            text: text.to_string(),
        }],
    }
}

#[async_trait]
impl Embedder for GeminiClient {
    async fn embed_documents(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = model_path(&self.embedding_model);
        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedRequest {
                    model: Some(model.clone()),
                    content: text_content(text),
                    task_type: "RETRIEVAL_DOCUMENT",
                })
                .collect(),
        };

        let url = self.endpoint(&self.embedding_model, "batchEmbedContents");
        let response: BatchEmbedResponse = self.post(&url, &request).await?;

        if response.embeddings.len() != texts.len() {
            return Err(LlmError::InvalidResponse(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                response.embeddings.len()
            )));
        }

        Ok(response.embeddings.into_iter().map(|e| e.values).collect())
    }

    async fn embed_query(&self, text: &str) -> LlmResult<Vec<f32>> {
        let request = EmbedRequest {
            model: None,
            content: text_content(text),
            task_type: "RETRIEVAL_QUERY",
        };

        let url = self.endpoint(&self.embedding_model, "embedContent");
        let response: EmbedResponse = self.post(&url, &request).await?;
        Ok(response.embedding.values)
    }

    fn model_name(&self) -> &str {
        &self.embedding_model
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &Prompt) -> LlmResult<String> {
        let system_instruction = (!prompt.system.is_empty()).then(|| Content {
            role: None,
            parts: prompt
                .system
                .iter()
                .map(|text| Part { text: text.clone() })
                .collect(),
        });

        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: prompt
                    .human
                    .iter()
                    .map(|text| Part { text: text.clone() })
                    .collect(),
            }],
            system_instruction,
            generation_config: self
                .temperature
                .map(|temperature| GenerationConfig { temperature }),
        };

        let url = self.endpoint(&self.generation_model, "generateContent");
        let response: GenerateResponse = self.post(&url, &request).await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No candidates returned".to_string()))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(LlmError::Blocked);
        }

        let text: String = candidate
            .content
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "No content parts in response".to_string(),
            ));
        }

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.generation_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path() {
        assert_eq!(model_path("gemini-1.5-flash"), "models/gemini-1.5-flash");
        assert_eq!(model_path("models/text-embedding-004"), "models/text-embedding-004");
    }

    #[test]
    fn test_endpoint_trims_base_url() {
        let client = GeminiClient::new("http://localhost:9/v1beta/", "k", "emb", "gen").unwrap();
        assert_eq!(
            client.endpoint("gen", "generateContent"),
            "http://localhost:9/v1beta/models/gen:generateContent"
        );
    }

    #[test]
    fn test_generate_request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            system_instruction: Some(text_content("be brief")),
            generation_config: Some(GenerationConfig { temperature: 0.5 }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_embed_request_shape() {
        let request = EmbedRequest {
            model: Some("models/text-embedding-004".to_string()),
            content: text_content("course"),
            task_type: "RETRIEVAL_DOCUMENT",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["taskType"], "RETRIEVAL_DOCUMENT");
        assert_eq!(json["model"], "models/text-embedding-004");
        assert_eq!(json["content"]["parts"][0]["text"], "course");
    }

    #[test]
    fn test_from_config_without_key() {
        let config = LlmConfig {
            api_key_env: "COURSE_SCOUT_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..LlmConfig::default()
        };
        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(LlmError::MissingApiKey(_))
        ));
    }
}

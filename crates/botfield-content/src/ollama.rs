//! Ollama HTTP generator.
//!
//! Requires the `http` feature and a running Ollama instance.

use crate::generator::{GenerateError, GenerateResult, GeneratorConfig, TextGenerator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama API request.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama API response.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Generator talking to the Ollama `/api/generate` endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use botfield_content::{OllamaHttpGenerator, TextGenerator};
///
/// let generator = OllamaHttpGenerator::localhost().with_model("llama3.2");
/// let text = generator.generate("Write one post.", Duration::from_secs(60)).await?;
/// ```
pub struct OllamaHttpGenerator {
    endpoint: String,
    config: GeneratorConfig,
    client: reqwest::Client,
}

impl OllamaHttpGenerator {
    /// Create a generator for the given endpoint.
    pub fn new(endpoint: &str) -> Self {
        Self::with_config(endpoint, GeneratorConfig::ollama())
    }

    /// Create with custom config.
    pub fn with_config(endpoint: &str, config: GeneratorConfig) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create with default localhost endpoint.
    pub fn localhost() -> Self {
        Self::new("http://localhost:11434")
    }

    /// Set the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.config.model = model.to_string();
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for OllamaHttpGenerator {
    fn name(&self) -> &str {
        "ollama-http"
    }

    async fn generate(&self, prompt: &str, timeout: Duration) -> GenerateResult<String> {
        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let url = format!("{}/api/generate", self.endpoint);

        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout(timeout)
                } else if e.is_connect() {
                    GenerateError::ConnectionFailed(format!(
                        "Cannot connect to Ollama at {}. Is Ollama running?",
                        self.endpoint
                    ))
                } else {
                    GenerateError::ApiError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 404 {
                return Err(GenerateError::ModelNotFound(format!(
                    "Model '{}' not found. Run: ollama pull {}",
                    self.config.model, self.config.model
                )));
            }

            return Err(GenerateError::ApiError(format!(
                "Ollama error {}: {}",
                status, body
            )));
        }

        let resp: OllamaResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerateError::Timeout(timeout)
            } else {
                GenerateError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(resp.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_config() {
        let generator = OllamaHttpGenerator::new("http://localhost:11434/").with_model("mistral");
        assert_eq!(generator.config().model, "mistral");
        assert_eq!(generator.endpoint, "http://localhost:11434");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails_fast() {
        // Port 9 (discard) is closed on any sane test host.
        let generator = OllamaHttpGenerator::new("http://127.0.0.1:9");
        let err = generator
            .generate("ping", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::ConnectionFailed(_) | GenerateError::ApiError(_)
        ));
    }
}

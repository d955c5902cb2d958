//! Core text generator trait.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

/// Text generation errors.
///
/// These never reach the orchestrator: the generated-content engine turns
/// each of them into fallback text.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Generator exited unsuccessfully (code {code:?}): {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for generator operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Configuration for generator requests.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Model name/identifier.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::ollama()
    }
}

impl GeneratorConfig {
    /// Config for a local Ollama model.
    pub fn ollama() -> Self {
        Self {
            model: "llama2".to_string(),
            max_tokens: 256,
            temperature: 0.7,
            timeout_secs: 60, // Local models can be slow to load
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Set timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Something that turns a prompt into raw text.
///
/// Implementations must give up once `timeout` has elapsed and report
/// [`GenerateError::Timeout`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the generator name.
    fn name(&self) -> &str;

    /// Generate a completion for a prompt.
    async fn generate(&self, prompt: &str, timeout: Duration) -> GenerateResult<String>;
}

/// A scripted reply for [`MockGenerator`].
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    NonZeroExit(i32),
    Timeout,
    Error(String),
}

impl MockReply {
    fn into_result(self, timeout: Duration) -> GenerateResult<String> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::NonZeroExit(code) => Err(GenerateError::NonZeroExit {
                code: Some(code),
                stderr: String::new(),
            }),
            MockReply::Timeout => Err(GenerateError::Timeout(timeout)),
            MockReply::Error(msg) => Err(GenerateError::ApiError(msg)),
        }
    }
}

/// A mock generator for testing.
///
/// Scripted replies are served first, in order. After that, the first
/// canned response whose pattern occurs in the prompt wins, and failing
/// that the default reply is returned.
pub struct MockGenerator {
    script: Mutex<VecDeque<MockReply>>,
    responses: Vec<(String, String)>,
    default_reply: MockReply,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Create a new mock generator.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            responses: Vec::new(),
            default_reply: MockReply::Text("Mock response".to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A generator that always answers with `reply`.
    pub fn always(reply: MockReply) -> Self {
        Self::new().with_default(reply)
    }

    /// Add a canned response for a prompt pattern.
    pub fn with_response(mut self, pattern: &str, response: &str) -> Self {
        self.responses.push((pattern.to_string(), response.to_string()));
        self
    }

    /// Queue a one-shot reply.
    pub fn then(mut self, reply: MockReply) -> Self {
        if let Ok(script) = self.script.get_mut() {
            script.push_back(reply);
        }
        self
    }

    /// Replace the reply used when nothing else matches.
    pub fn with_default(mut self, reply: MockReply) -> Self {
        self.default_reply = reply;
        self
    }

    /// Every prompt received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str, timeout: Duration) -> GenerateResult<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        if let Some(reply) = scripted {
            return reply.into_result(timeout);
        }

        for (pattern, response) in &self.responses {
            if prompt.contains(pattern.as_str()) {
                return Ok(response.clone());
            }
        }

        self.default_reply.clone().into_result(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_generator() {
        let generator = MockGenerator::new().with_response("reply", "Good point.");

        let response = generator
            .generate("Please reply to this", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(response, "Good point.");

        let fallback = generator.generate("Write a post", Duration::from_secs(1)).await.unwrap();
        assert_eq!(fallback, "Mock response");
        assert_eq!(generator.prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_script_runs_before_patterns() {
        let generator = MockGenerator::new()
            .with_response("post", "patterned")
            .then(MockReply::Timeout)
            .then(MockReply::NonZeroExit(2));

        let timeout = Duration::from_millis(5);
        assert!(matches!(
            generator.generate("post", timeout).await,
            Err(GenerateError::Timeout(d)) if d == timeout
        ));
        assert!(matches!(
            generator.generate("post", timeout).await,
            Err(GenerateError::NonZeroExit { code: Some(2), .. })
        ));
        assert_eq!(generator.generate("post", timeout).await.unwrap(), "patterned");
    }

    #[test]
    fn test_config_builders() {
        let config = GeneratorConfig::ollama()
            .with_model("mistral")
            .with_temperature(5.0)
            .with_timeout(10);
        assert_eq!(config.model, "mistral");
        assert_eq!(config.temperature, 2.0);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(GeneratorConfig::default().timeout_secs, 60);
    }
}

//! Generator-backed engine.
//!
//! Builds a persona prompt, hands it to a [`TextGenerator`] and sanitizes
//! the answer. Every generator failure becomes a degraded outcome with
//! fallback text; nothing is returned as an error.

use crate::engine::{ContentEngine, DegradeReason, GenerationOutcome};
use crate::generator::{GenerateError, TextGenerator};
use crate::prompt::{PostPrompt, PromptTemplate};
use crate::sanitize::sanitize;
use async_trait::async_trait;
use botfield_agents::agent::Agent;
use botfield_core::types::{Post, Tick};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default generation deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Content engine delegating to a text generator.
pub struct GeneratedContentEngine {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl GeneratedContentEngine {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the generation deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Map a generator result onto an outcome for `agent_name`.
    pub fn interpret(result: Result<String, GenerateError>, agent_name: &str) -> GenerationOutcome {
        let reason = match result {
            Ok(raw) => {
                if raw.trim().is_empty() {
                    DegradeReason::EmptyOutput
                } else {
                    let clean = sanitize(&raw);
                    if clean.is_empty() {
                        DegradeReason::EmptyOutput
                    } else {
                        return GenerationOutcome::Success(clean);
                    }
                }
            }
            Err(GenerateError::NonZeroExit { code, .. }) => DegradeReason::NonZeroExit { code },
            Err(GenerateError::Timeout(after)) => DegradeReason::Timeout { after },
            Err(other) => DegradeReason::Invocation(other.to_string()),
        };
        GenerationOutcome::degraded(reason, agent_name)
    }
}

#[async_trait]
impl ContentEngine for GeneratedContentEngine {
    fn name(&self) -> &str {
        self.generator.name()
    }

    async fn generate_post(&self, agent: &Agent, tick: Tick, context: &[Post]) -> GenerationOutcome {
        let prompt = PostPrompt::for_agent(agent, context);
        debug!(
            agent = agent.name(),
            tick,
            reply = prompt.is_reply(),
            generator = self.generator.name(),
            "requesting generated post"
        );

        let result = self.generator.generate(&prompt.generate(), self.timeout).await;
        let outcome = Self::interpret(result, agent.name());

        if let Some(reason) = outcome.degrade_reason() {
            warn!(agent = agent.name(), tick, reason = %reason, "generation degraded, using fallback text");
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpret_sanitizes_success() {
        let outcome = GeneratedContentEngine::interpret(
            Ok("  \"Sure, a calm morning. #peace\"\n".to_string()),
            "PassiveAgent",
        );
        assert_eq!(outcome, GenerationOutcome::Success("a calm morning.".into()));
    }

    #[test]
    fn interpret_maps_errors_to_sentinels() {
        let exit = GeneratedContentEngine::interpret(
            Err(GenerateError::NonZeroExit { code: Some(1), stderr: "boom".into() }),
            "NoisyAgent",
        );
        assert_eq!(exit.text(), "[LLM ERROR] NoisyAgent failed to generate post.");

        let timeout = GeneratedContentEngine::interpret(
            Err(GenerateError::Timeout(Duration::from_secs(60))),
            "NoisyAgent",
        );
        assert_eq!(timeout.text(), "[LLM TIMEOUT] NoisyAgent took too long.");

        let other = GeneratedContentEngine::interpret(
            Err(GenerateError::ConnectionFailed("refused".into())),
            "NoisyAgent",
        );
        assert_eq!(other.text(), "[LLM EXCEPTION] Connection failed: refused");
    }

    #[test]
    fn interpret_treats_blank_and_emoji_only_output_as_empty() {
        for raw in ["", "   \n", "\u{1F600}\u{1F600}"] {
            let outcome = GeneratedContentEngine::interpret(Ok(raw.to_string()), "BalancedAgent");
            assert_eq!(outcome.text(), "BalancedAgent is thinking...");
            assert_eq!(outcome.degrade_reason(), Some(&DegradeReason::EmptyOutput));
        }
    }
}

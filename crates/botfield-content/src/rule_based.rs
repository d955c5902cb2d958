//! Deterministic template engine.

use crate::engine::{ContentEngine, GenerationOutcome};
use async_trait::async_trait;
use botfield_agents::agent::Agent;
use botfield_core::types::{Post, Tick, Voice};

const NOISY: [&str; 3] = [
    "I can't believe it's already tick {tick}. Things are moving fast.",
    "Another thought at tick {tick}: momentum matters.",
    "Tick {tick} and still pushing forward.",
];

const BALANCED: [&str; 3] = [
    "Tick {tick}. Observing before acting.",
    "Steady progress at tick {tick}.",
    "Tick {tick}. Balance is everything.",
];

const PASSIVE: [&str; 3] = [
    "Tick {tick}. Just watching.",
    "Quiet thoughts at tick {tick}.",
    "Still here at tick {tick}.",
];

/// Picks a template by voice and tick. Same inputs, same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedEngine;

impl RuleBasedEngine {
    pub fn new() -> Self {
        Self
    }

    /// The templates for a voice.
    pub fn templates(voice: Voice) -> &'static [&'static str; 3] {
        match voice {
            Voice::Noisy => &NOISY,
            Voice::Balanced => &BALANCED,
            Voice::Passive => &PASSIVE,
        }
    }

    /// Render the template at `tick mod 3`.
    pub fn render(voice: Voice, tick: Tick) -> String {
        let templates = Self::templates(voice);
        let index = (tick % templates.len() as u64) as usize;
        templates[index].replace("{tick}", &tick.to_string())
    }
}

#[async_trait]
impl ContentEngine for RuleBasedEngine {
    fn name(&self) -> &str {
        "rule"
    }

    async fn generate_post(&self, agent: &Agent, tick: Tick, _context: &[Post]) -> GenerationOutcome {
        GenerationOutcome::Success(Self::render(agent.voice(), tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botfield_core::types::AgentId;

    #[test]
    fn passive_tick_seven_uses_second_template() {
        assert_eq!(RuleBasedEngine::render(Voice::Passive, 7), "Quiet thoughts at tick 7.");
    }

    #[test]
    fn templates_cycle_with_tick() {
        assert_eq!(RuleBasedEngine::render(Voice::Noisy, 3), "I can't believe it's already tick 3. Things are moving fast.");
        assert_eq!(RuleBasedEngine::render(Voice::Noisy, 4), "Another thought at tick 4: momentum matters.");
        assert_eq!(RuleBasedEngine::render(Voice::Balanced, 5), "Tick 5. Balance is everything.");
    }

    #[tokio::test]
    async fn engine_ignores_context() {
        let agent = Agent::new(AgentId(1), "BalancedAgent", 0.5, Voice::Balanced).unwrap();
        let engine = RuleBasedEngine::new();

        let context = vec![Post {
            id: botfield_core::types::PostId(1),
            author_id: AgentId(2),
            content: "something to reply to".into(),
            created_at: Default::default(),
        }];

        let with_context = engine.generate_post(&agent, 10, &context).await;
        let without = engine.generate_post(&agent, 10, &[]).await;
        assert_eq!(with_context, without);
        assert_eq!(without.text(), "Steady progress at tick 10.");
    }
}

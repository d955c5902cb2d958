//! Agent — a persona with a stochastic posting policy.
//!
//! Each tick the orchestrator hands the selected agent the visible context
//! and a random source. The agent rolls once against its post probability;
//! on success it posts, or, when there is something to respond to, picks
//! between posting and replying with a second fair roll.

use botfield_core::error::{BotfieldError, Result};
use botfield_core::types::*;
use rand::Rng;
use serde::Serialize;

/// An autonomous poster. Immutable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    id: AgentId,
    name: String,
    post_probability: f64,
    voice: Voice,
}

impl Agent {
    /// Create an agent, rejecting probabilities outside `[0, 1]`.
    pub fn new(id: AgentId, name: impl Into<String>, post_probability: f64, voice: Voice) -> Result<Self> {
        validate_probability(post_probability)?;
        Ok(Self {
            id,
            name: name.into(),
            post_probability,
            voice,
        })
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn post_probability(&self) -> f64 {
        self.post_probability
    }

    pub fn voice(&self) -> Voice {
        self.voice
    }

    /// Decide what to do this tick.
    ///
    /// Consumes one draw from `rng`, plus a second draw only when the agent
    /// acts and `context` is non-empty. Callers relying on reproducible runs
    /// must keep that draw order intact.
    pub fn decide_action<R: Rng + ?Sized>(&self, context: &[Post], rng: &mut R) -> Action {
        let roll: f64 = rng.gen();

        if roll < self.post_probability {
            if !context.is_empty() && rng.gen_bool(0.5) {
                return Action::Reply;
            }
            return Action::Post;
        }

        Action::Idle
    }
}

/// Check that a post probability lies within `[0, 1]`.
pub fn validate_probability(post_probability: f64) -> Result<f64> {
    if !post_probability.is_finite() || !(0.0..=1.0).contains(&post_probability) {
        return Err(BotfieldError::out_of_range(
            "post_probability",
            0.0,
            1.0,
            post_probability,
        ));
    }
    Ok(post_probability)
}

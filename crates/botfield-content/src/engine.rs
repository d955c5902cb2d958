//! The content engine contract.
//!
//! An engine turns a persona, a tick and the visible context into post
//! text. Engines never fail: when a backend cannot produce usable text the
//! engine reports a degraded outcome that still carries fallback text, so a
//! tick always completes.

use async_trait::async_trait;
use botfield_agents::agent::Agent;
use botfield_core::types::{Post, Tick};
use std::fmt;
use std::time::Duration;

/// Why generation fell back to placeholder text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// The generator process exited unsuccessfully.
    NonZeroExit { code: Option<i32> },
    /// The generator produced nothing usable.
    EmptyOutput,
    /// The generator ran past its deadline.
    Timeout { after: Duration },
    /// The generator could not be invoked or failed in some other way.
    Invocation(String),
}

impl DegradeReason {
    /// Short machine-readable label, recorded with the post event.
    pub fn label(&self) -> &'static str {
        match self {
            DegradeReason::NonZeroExit { .. } => "non_zero_exit",
            DegradeReason::EmptyOutput => "empty_output",
            DegradeReason::Timeout { .. } => "timeout",
            DegradeReason::Invocation(_) => "invocation_error",
        }
    }

    /// The placeholder post stored in place of generated text.
    ///
    /// Each kind carries a recognizable prefix so operators can find
    /// degraded posts in the feed.
    pub fn fallback_text(&self, agent_name: &str) -> String {
        match self {
            DegradeReason::NonZeroExit { .. } => {
                format!("[LLM ERROR] {agent_name} failed to generate post.")
            }
            DegradeReason::EmptyOutput => format!("{agent_name} is thinking..."),
            DegradeReason::Timeout { .. } => format!("[LLM TIMEOUT] {agent_name} took too long."),
            DegradeReason::Invocation(message) => format!("[LLM EXCEPTION] {message}"),
        }
    }
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::NonZeroExit { code: Some(code) } => {
                write!(f, "generator exited with code {code}")
            }
            DegradeReason::NonZeroExit { code: None } => {
                write!(f, "generator terminated by signal")
            }
            DegradeReason::EmptyOutput => write!(f, "generator produced no output"),
            DegradeReason::Timeout { after } => write!(f, "generator timed out after {after:?}"),
            DegradeReason::Invocation(message) => write!(f, "generator failed: {message}"),
        }
    }
}

/// Result of asking an engine for a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(String),
    Degraded {
        reason: DegradeReason,
        fallback: String,
    },
}

impl GenerationOutcome {
    /// Degraded outcome carrying the standard fallback text for `agent_name`.
    pub fn degraded(reason: DegradeReason, agent_name: &str) -> Self {
        let fallback = reason.fallback_text(agent_name);
        GenerationOutcome::Degraded { reason, fallback }
    }

    /// The text to store, whichever way generation went.
    pub fn text(&self) -> &str {
        match self {
            GenerationOutcome::Success(text) => text,
            GenerationOutcome::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            GenerationOutcome::Success(text) => text,
            GenerationOutcome::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn degrade_reason(&self) -> Option<&DegradeReason> {
        match self {
            GenerationOutcome::Success(_) => None,
            GenerationOutcome::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degrade_reason().is_some()
    }
}

/// Produces post text for an agent.
#[async_trait]
pub trait ContentEngine: Send + Sync {
    /// Engine name (for banners and logging).
    fn name(&self) -> &str;

    /// Generate a post for `agent` at `tick`.
    ///
    /// `context` is the newest-first view of recent posts; a non-empty
    /// context means the agent may be replying to `context[0]`.
    async fn generate_post(&self, agent: &Agent, tick: Tick, context: &[Post]) -> GenerationOutcome;
}

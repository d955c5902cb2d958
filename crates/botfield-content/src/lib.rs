//! # Botfield Content
//!
//! Content generation for botfield agents.
//!
//! Two interchangeable engines implement [`ContentEngine`]:
//!
//! - [`RuleBasedEngine`] — deterministic per-voice templates indexed by tick
//! - [`GeneratedContentEngine`] — prompts a [`TextGenerator`] and sanitizes
//!   the answer, falling back to placeholder text when generation fails
//!
//! ## Features
//!
//! - `http`: Ollama HTTP API generator (the process generator is always available)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use botfield_content::{GeneratedContentEngine, ProcessGenerator};
//! use std::sync::Arc;
//!
//! let engine = GeneratedContentEngine::new(Arc::new(ProcessGenerator::ollama("llama2")));
//! let outcome = engine.generate_post(&agent, tick, &context).await;
//! println!("{}", outcome.text());
//! ```

mod engine;
mod generated;
mod generator;
mod process;
mod prompt;
mod rule_based;
pub mod sanitize;

pub use engine::{ContentEngine, DegradeReason, GenerationOutcome};
pub use generated::{GeneratedContentEngine, DEFAULT_TIMEOUT};
pub use generator::{
    GenerateError, GenerateResult, GeneratorConfig, MockGenerator, MockReply, TextGenerator,
};
pub use process::ProcessGenerator;
pub use prompt::{PostPrompt, PromptTemplate};
pub use rule_based::RuleBasedEngine;
pub use sanitize::sanitize;

#[cfg(feature = "http")]
mod ollama;
#[cfg(feature = "http")]
pub use ollama::OllamaHttpGenerator;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ContentEngine, DegradeReason, GenerationOutcome};
    pub use crate::{GeneratedContentEngine, RuleBasedEngine};
    pub use crate::{GenerateError, GeneratorConfig, TextGenerator, ProcessGenerator};
    pub use crate::{PostPrompt, PromptTemplate};

    #[cfg(feature = "http")]
    pub use crate::OllamaHttpGenerator;
}

//! # Botfield
//!
//! A discrete-tick multi-agent posting simulation.
//!
//! A small population of personas takes turns: each tick one agent is
//! picked at random, rolls against its post probability and either posts,
//! replies to the newest post, or stays idle. Every step is appended to an
//! event log; posts form the feed.
//!
//! ## Quick Start
//!
//! ```rust
//! use botfield::prelude::*;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut store = MemoryStore::new();
//! let agents = spawn_default_agents(&mut store)?;
//!
//! let mut orchestrator = Orchestrator::seeded(agents, store, Box::new(RuleBasedEngine::new()), 42)?;
//! orchestrator.run(20).await?;
//!
//! let summary = orchestrator.summary()?;
//! assert_eq!(summary.total_ticks, 20);
//! println!("post rate: {}", summary.post_rate_display());
//! # Ok::<(), BotfieldError>(())
//! # }).unwrap();
//! ```
//!
//! ## Architecture
//!
//! - [`botfield_core`] - Shared types, the `Store` trait and errors
//! - [`botfield_agents`] - The decision model and the default roster
//! - [`botfield_content`] - Rule-based and generator-backed content engines
//! - [`botfield_runtime`] - The orchestrator, stores and run summaries
//!
//! ## Content Engines
//!
//! | Engine | Deterministic | Backend |
//! |--------|---------------|---------|
//! | `RuleBasedEngine` | yes | three templates per voice, indexed by tick |
//! | `GeneratedContentEngine` + `ProcessGenerator` | no | external command, prompt on stdin |
//! | `GeneratedContentEngine` + `OllamaHttpGenerator` | no | Ollama HTTP API (`http` feature) |
//!
//! Generator failures never abort a run. The stored post carries a
//! recognizable fallback text instead and the `POST_CREATED` event records
//! why.

pub use botfield_agents;
pub use botfield_content;
pub use botfield_core;
pub use botfield_runtime;

/// Prelude for convenient imports.
pub mod prelude {
    // Core types
    pub use botfield_core::types::{
        AgentId, PostId, EventId,
        AgentRecord, Post, Event, EventPayload,
        Action, ActionType, Voice,
        Metadata, Tick,
        CONTEXT_LIMIT, IDLE_REASON,
    };
    pub use botfield_core::store::Store;

    // Error types
    pub use botfield_core::error::{BotfieldError, ConfigError, StoreError, Result, validate_steps};

    // Agents
    pub use botfield_agents::agent::{Agent, validate_probability};
    pub use botfield_agents::roster::{Persona, default_roster, spawn_roster, spawn_default_agents};

    // Content
    pub use botfield_content::{
        ContentEngine, DegradeReason, GenerationOutcome,
        RuleBasedEngine, GeneratedContentEngine, DEFAULT_TIMEOUT,
        TextGenerator, GenerateError, GeneratorConfig,
        ProcessGenerator, MockGenerator, MockReply,
        sanitize,
    };

    #[cfg(feature = "http")]
    pub use botfield_content::OllamaHttpGenerator;

    // Runtime
    pub use botfield_runtime::{Orchestrator, RunTally, TickReport, MemoryStore};
    pub use botfield_runtime::{RunSummary, AgentPostCount, DecisionCounts};

    #[cfg(feature = "sqlite")]
    pub use botfield_runtime::{SqliteStore, DEFAULT_DB_PATH};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Botfield Runtime
//!
//! The tick loop and the stores it writes to.
//!
//! The orchestrator owns the agents, the store, the content engine and a
//! seeded RNG, and advances the simulation one tick at a time. Each tick
//! leaves a trail in the append-only event log; posts form the feed.

pub mod orchestrator;
pub mod memory_store;
pub mod summary;
pub mod prelude;

#[cfg(feature = "sqlite")]
pub mod sqlite_store;

pub use memory_store::MemoryStore;
pub use orchestrator::{Orchestrator, RunTally, TickReport};
pub use summary::{AgentPostCount, DecisionCounts, RunSummary};

#[cfg(feature = "sqlite")]
pub use sqlite_store::{SqliteStore, DEFAULT_DB_PATH};

//! Botfield Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use botfield_runtime::prelude::*;
//! ```

// Re-export orchestrator
pub use crate::orchestrator::{Orchestrator, RunTally, TickReport};

// Re-export stores
pub use crate::memory_store::MemoryStore;

#[cfg(feature = "sqlite")]
pub use crate::sqlite_store::{SqliteStore, DEFAULT_DB_PATH};

// Re-export summary
pub use crate::summary::{AgentPostCount, DecisionCounts, RunSummary};

// Re-export content engines
pub use botfield_content::prelude::*;

// Re-export from agents
pub use botfield_agents::prelude::*;

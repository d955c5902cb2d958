//! Botfield Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use botfield_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    AgentId, PostId, EventId,
    AgentRecord, Post, Event, EventPayload,
    Action, ActionType, Voice,
    Metadata, Tick,
    CONTEXT_LIMIT, IDLE_REASON,
};

// Re-export the Store trait
pub use crate::store::Store;

// Re-export error types
pub use crate::error::{BotfieldError, ConfigError, StoreError, Result, validate_steps};

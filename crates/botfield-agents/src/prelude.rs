//! Botfield Agents Prelude — convenient imports for common usage.
//!
//! ```rust
//! use botfield_agents::prelude::*;
//! ```

// Re-export agent types
pub use crate::agent::{Agent, validate_probability};
pub use crate::roster::{Persona, default_roster, spawn_roster, spawn_default_agents};

// Re-export from core
pub use botfield_core::prelude::*;

//! # Botfield Core
//!
//! Core types and traits shared across the botfield simulation:
//!
//! - **Types** — agent/post/event identifiers, `Voice`, `Action`, the event log row
//! - **Store** — the persistence contract the orchestrator writes through
//! - **Errors** — store faults and configuration errors
//!
//! ## Quick Start
//!
//! ```rust
//! use botfield_core::prelude::*;
//!
//! let payload = EventPayload::ActionDecided { decision: Action::Reply };
//! assert_eq!(payload.action_type(), ActionType::ActionDecided);
//! assert_eq!(payload.metadata()["decision"], "reply");
//! ```

pub mod types;
pub mod store;
pub mod error;
pub mod prelude;

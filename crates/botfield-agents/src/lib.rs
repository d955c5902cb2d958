//! # Botfield Agents
//!
//! The agent decision model and the default persona roster.
//!
//! - **Agent** — rolls against its post probability each time it is selected;
//!   with visible context, a successful roll splits evenly between posting
//!   and replying
//! - **Roster** — the three baseline personas (passive, balanced, noisy)

pub mod agent;
pub mod roster;
pub mod prelude;

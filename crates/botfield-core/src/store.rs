//! Store — the persistence contract consumed by the simulation.
//!
//! The orchestrator is the only writer. Posts and events are append-only;
//! nothing in the simulation updates or deletes a row.

use crate::error::Result;
use crate::types::*;

/// Durable home for agents, posts and the event log.
///
/// This is a trait rather than a concrete type so that the simulation can
/// run against SQLite in production and an in-memory store in tests.
pub trait Store {
    /// Register an agent and return its assigned ID.
    fn insert_agent(&mut self, name: &str) -> Result<AgentId>;

    /// Append a post authored by `author_id`.
    fn insert_post(&mut self, author_id: AgentId, content: &str) -> Result<PostId>;

    /// Append an event to the log.
    fn insert_event(
        &mut self,
        tick: Tick,
        agent_id: AgentId,
        action_type: ActionType,
        metadata: &Metadata,
    ) -> Result<()>;

    /// The `limit` most recent posts, newest first.
    fn recent_posts(&self, limit: usize) -> Result<Vec<Post>>;

    /// All registered agents, in registration order.
    fn agents(&self) -> Result<Vec<AgentRecord>>;

    /// All posts, oldest first.
    fn posts(&self) -> Result<Vec<Post>>;

    /// The full event log, in insertion order.
    fn events(&self) -> Result<Vec<Event>>;

    /// Discard every agent, post and event.
    fn reset(&mut self) -> Result<()>;

    /// Append a typed event.
    fn record(&mut self, tick: Tick, agent_id: AgentId, payload: &EventPayload) -> Result<()> {
        self.insert_event(tick, agent_id, payload.action_type(), &payload.metadata())
    }
}

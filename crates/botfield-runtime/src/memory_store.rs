//! In-memory implementation of the Store trait.
//!
//! Mirrors the SQLite store's behavior (sequential IDs starting at 1,
//! agent references checked on insert) without touching disk.

use botfield_core::error::{BotfieldError, Result};
use botfield_core::store::Store;
use botfield_core::types::*;
use chrono::Utc;

/// Vec-backed store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    agents: Vec<AgentRecord>,
    posts: Vec<Post>,
    events: Vec<Event>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_agent(&self, id: AgentId) -> Result<()> {
        if self.agents.iter().any(|a| a.id == id) {
            Ok(())
        } else {
            Err(BotfieldError::unknown_agent(id))
        }
    }
}

impl Store for MemoryStore {
    fn insert_agent(&mut self, name: &str) -> Result<AgentId> {
        let id = AgentId(self.agents.len() as i64 + 1);
        self.agents.push(AgentRecord {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn insert_post(&mut self, author_id: AgentId, content: &str) -> Result<PostId> {
        self.ensure_agent(author_id)?;
        let id = PostId(self.posts.len() as i64 + 1);
        self.posts.push(Post {
            id,
            author_id,
            content: content.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn insert_event(
        &mut self,
        tick: Tick,
        agent_id: AgentId,
        action_type: ActionType,
        metadata: &Metadata,
    ) -> Result<()> {
        self.ensure_agent(agent_id)?;
        let id = EventId(self.events.len() as i64 + 1);
        self.events.push(Event {
            id,
            tick,
            agent_id,
            action_type,
            metadata: metadata.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    fn recent_posts(&self, limit: usize) -> Result<Vec<Post>> {
        Ok(self.posts.iter().rev().take(limit).cloned().collect())
    }

    fn agents(&self) -> Result<Vec<AgentRecord>> {
        Ok(self.agents.clone())
    }

    fn posts(&self) -> Result<Vec<Post>> {
        Ok(self.posts.clone())
    }

    fn events(&self) -> Result<Vec<Event>> {
        Ok(self.events.clone())
    }

    fn reset(&mut self) -> Result<()> {
        self.agents.clear();
        self.posts.clear();
        self.events.clear();
        Ok(())
    }
}

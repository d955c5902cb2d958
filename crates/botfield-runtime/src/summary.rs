//! Run summary — read-only aggregation over the stored event log.

use botfield_core::error::Result;
use botfield_core::store::Store;
use botfield_core::types::*;
use serde::Serialize;
use std::collections::HashMap;

/// Posts authored by one agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentPostCount {
    pub agent_id: AgentId,
    pub name: String,
    pub posts: usize,
}

/// How often each decision was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecisionCounts {
    pub post: usize,
    pub reply: usize,
    pub idle: usize,
}

/// Aggregate view of everything in a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of ticks, counted as `AGENT_SELECTED` events.
    pub total_ticks: usize,
    pub total_events: usize,
    pub total_posts: usize,
    pub idle_events: usize,
    /// Per-agent post counts, in registration order. Agents that never
    /// posted are listed with zero.
    pub posts_per_agent: Vec<AgentPostCount>,
    pub decisions: DecisionCounts,
    /// Posts whose content is fallback text.
    pub degraded_posts: usize,
    /// `total_posts / total_ticks × 100`, or 0 with no ticks.
    pub post_rate: f64,
}

impl RunSummary {
    /// Compute the summary of whatever `store` holds.
    pub fn compute<S: Store + ?Sized>(store: &S) -> Result<Self> {
        let agents = store.agents()?;
        let posts = store.posts()?;
        let events = store.events()?;

        let mut total_ticks = 0;
        let mut idle_events = 0;
        let mut degraded_posts = 0;
        let mut decisions = DecisionCounts::default();

        for event in &events {
            match event.action_type {
                ActionType::AgentSelected => total_ticks += 1,
                ActionType::AgentIdle => idle_events += 1,
                ActionType::PostCreated => {
                    if event.metadata.contains_key("degraded") {
                        degraded_posts += 1;
                    }
                }
                ActionType::ActionDecided => match event.metadata_str("decision") {
                    Some("post") => decisions.post += 1,
                    Some("reply") => decisions.reply += 1,
                    Some("idle") => decisions.idle += 1,
                    _ => {}
                },
            }
        }

        let mut by_author: HashMap<AgentId, usize> = HashMap::new();
        for post in &posts {
            *by_author.entry(post.author_id).or_default() += 1;
        }
        let posts_per_agent = agents
            .into_iter()
            .map(|a| AgentPostCount {
                posts: by_author.get(&a.id).copied().unwrap_or(0),
                agent_id: a.id,
                name: a.name,
            })
            .collect();

        let total_posts = posts.len();
        let post_rate = if total_ticks > 0 {
            total_posts as f64 / total_ticks as f64 * 100.0
        } else {
            0.0
        };

        Ok(Self {
            total_ticks,
            total_events: events.len(),
            total_posts,
            idle_events,
            posts_per_agent,
            decisions,
            degraded_posts,
            post_rate,
        })
    }

    /// Post rate with two decimals, e.g. `"100.00%"`.
    pub fn post_rate_display(&self) -> String {
        format!("{:.2}%", self.post_rate)
    }
}

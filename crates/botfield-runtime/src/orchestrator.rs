//! Orchestrator — the tick loop.
//!
//! Each tick:
//! 1. The tick counter advances (the first tick is 1)
//! 2. One agent is picked uniformly at random
//! 3. `AGENT_SELECTED` is appended
//! 4. The five newest posts are read as context
//! 5. The agent decides an action
//! 6. `ACTION_DECIDED` is appended
//! 7. On post/reply: context is read again, content generated, the post
//!    inserted and `POST_CREATED` appended
//! 8. Otherwise `AGENT_IDLE` is appended
//!
//! Ticks run strictly one after another. Generation is awaited inline, so
//! no tick overlaps another. Store errors abort the run.

use crate::summary::RunSummary;
use botfield_agents::agent::Agent;
use botfield_content::{ContentEngine, DegradeReason};
use botfield_core::error::{BotfieldError, Result};
use botfield_core::store::Store;
use botfield_core::types::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

/// What happened on one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: Tick,
    pub agent_id: AgentId,
    pub agent_name: String,
    pub action: Action,
    /// The post created this tick, if any.
    pub post_id: Option<PostId>,
    /// Set when the post holds fallback text.
    #[serde(skip)]
    pub degraded: Option<DegradeReason>,
}

/// Running totals for one call to [`Orchestrator::run_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTally {
    pub ticks: u64,
    pub posts: u64,
    /// Posts holding fallback text.
    pub degraded: u64,
}

impl RunTally {
    fn add(&mut self, report: &TickReport) {
        self.ticks += 1;
        if report.post_id.is_some() {
            self.posts += 1;
        }
        if report.degraded.is_some() {
            self.degraded += 1;
        }
    }
}

/// Drives the simulation against a store and a content engine.
pub struct Orchestrator<S: Store> {
    agents: Vec<Agent>,
    store: S,
    engine: Box<dyn ContentEngine>,
    rng: StdRng,
    tick: Tick,
}

impl<S: Store> Orchestrator<S> {
    /// Create an orchestrator. The roster must not be empty.
    pub fn new(agents: Vec<Agent>, store: S, engine: Box<dyn ContentEngine>, rng: StdRng) -> Result<Self> {
        if agents.is_empty() {
            return Err(BotfieldError::invalid_config(
                "agents",
                "[]",
                "at least one agent is required",
            ));
        }
        Ok(Self {
            agents,
            store,
            engine,
            rng,
            tick: 0,
        })
    }

    /// Create an orchestrator with an RNG seeded from `seed`.
    pub fn seeded(agents: Vec<Agent>, store: S, engine: Box<dyn ContentEngine>, seed: u64) -> Result<Self> {
        Self::new(agents, store, engine, StdRng::seed_from_u64(seed))
    }

    /// Run `steps` ticks and collect a report for each one.
    ///
    /// Every report is kept in memory; long runs should use
    /// [`run_with`](Self::run_with) instead.
    pub async fn run(&mut self, steps: u64) -> Result<Vec<TickReport>> {
        let mut reports = Vec::new();
        self.run_with(steps, |report| reports.push(report.clone())).await?;
        Ok(reports)
    }

    /// Run `steps` ticks, handing each report to `on_tick`.
    ///
    /// Reports are not retained. The returned tally counts what happened.
    pub async fn run_with<F>(&mut self, steps: u64, mut on_tick: F) -> Result<RunTally>
    where
        F: FnMut(&TickReport),
    {
        info!(steps, agents = self.agents.len(), engine = self.engine.name(), "starting run");

        let mut tally = RunTally::default();
        for _ in 0..steps {
            let report = self.process_tick().await?;
            tally.add(&report);
            on_tick(&report);
        }

        info!(ticks = tally.ticks, posts = tally.posts, degraded = tally.degraded, "run complete");
        Ok(tally)
    }

    /// Execute a single tick.
    pub async fn process_tick(&mut self) -> Result<TickReport> {
        self.tick += 1;
        let tick = self.tick;

        let index = self.pick_agent();
        let agent = &self.agents[index];
        self.store.record(
            tick,
            agent.id(),
            &EventPayload::AgentSelected {
                agent_name: agent.name().to_string(),
            },
        )?;

        let context = self.store.recent_posts(CONTEXT_LIMIT)?;
        let action = agent.decide_action(&context, &mut self.rng);
        self.store
            .record(tick, agent.id(), &EventPayload::ActionDecided { decision: action })?;

        let mut report = TickReport {
            tick,
            agent_id: agent.id(),
            agent_name: agent.name().to_string(),
            action,
            post_id: None,
            degraded: None,
        };

        if action.creates_post() {
            // Fetched again rather than reused from the decision step.
            let context = self.store.recent_posts(CONTEXT_LIMIT)?;
            let outcome = self.engine.generate_post(agent, tick, &context).await;
            let degraded = outcome.degrade_reason().cloned();
            let content = outcome.into_text();

            let post_id = self.store.insert_post(agent.id(), &content)?;
            self.store.record(
                tick,
                agent.id(),
                &EventPayload::PostCreated {
                    post_id,
                    content_length: content.chars().count(),
                    degraded: degraded.as_ref().map(|r| r.label().to_string()),
                },
            )?;

            debug!(tick, agent = agent.name(), %action, post_id = post_id.0, "post created");
            report.post_id = Some(post_id);
            report.degraded = degraded;
        } else {
            self.store.record(tick, agent.id(), &EventPayload::idle())?;
            debug!(tick, agent = agent.name(), "agent idle");
        }

        Ok(report)
    }

    fn pick_agent(&mut self) -> usize {
        self.rng.gen_range(0..self.agents.len())
    }

    /// Current tick (0 before the first tick).
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Summary of everything in the store.
    pub fn summary(&self) -> Result<RunSummary> {
        RunSummary::compute(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryStore;
    use botfield_agents::roster::{spawn_roster, Persona};
    use botfield_content::RuleBasedEngine;

    fn orchestrator(personas: &[Persona], seed: u64) -> Orchestrator<MemoryStore> {
        let mut store = MemoryStore::new();
        let agents = spawn_roster(&mut store, personas).unwrap();
        Orchestrator::seeded(agents, store, Box::new(RuleBasedEngine::new()), seed).unwrap()
    }

    #[test]
    fn empty_roster_is_rejected() {
        let result = Orchestrator::seeded(Vec::new(), MemoryStore::new(), Box::new(RuleBasedEngine::new()), 1);
        assert!(matches!(result, Err(BotfieldError::Config(_))));
    }

    #[tokio::test]
    async fn ticks_start_at_one() {
        let mut orch = orchestrator(&[Persona::new("BalancedAgent", 0.5, Voice::Balanced)], 42);
        assert_eq!(orch.tick(), 0);

        let first = orch.process_tick().await.unwrap();
        assert_eq!(first.tick, 1);
        let second = orch.process_tick().await.unwrap();
        assert_eq!(second.tick, 2);
    }

    #[tokio::test]
    async fn idle_tick_records_three_events() {
        let mut orch = orchestrator(&[Persona::new("PassiveAgent", 0.0, Voice::Passive)], 42);
        let report = orch.process_tick().await.unwrap();
        assert_eq!(report.action, Action::Idle);
        assert_eq!(report.post_id, None);

        let kinds: Vec<ActionType> = orch.store().events().unwrap().iter().map(|e| e.action_type).collect();
        assert_eq!(
            kinds,
            [ActionType::AgentSelected, ActionType::ActionDecided, ActionType::AgentIdle]
        );
    }

    #[tokio::test]
    async fn posting_tick_stores_rule_text() {
        let mut orch = orchestrator(&[Persona::new("NoisyAgent", 1.0, Voice::Noisy)], 42);
        let report = orch.process_tick().await.unwrap();
        assert_eq!(report.action, Action::Post);

        let posts = orch.store().posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "Another thought at tick 1: momentum matters.");
        assert_eq!(report.post_id, Some(posts[0].id));
    }

    #[tokio::test]
    async fn tally_counts_posts_and_fallbacks() {
        let mut orch = orchestrator(&[Persona::new("NoisyAgent", 1.0, Voice::Noisy)], 42);
        let mut seen = 0;
        let tally = orch.run_with(4, |_| seen += 1).await.unwrap();
        assert_eq!(seen, 4);
        assert_eq!(
            tally,
            RunTally {
                ticks: 4,
                posts: 4,
                degraded: 0
            }
        );
    }

    #[tokio::test]
    async fn unbounded_step_count_does_not_reserve_up_front() {
        // The agent was never registered, so the first tick fails.
        let stranger = Agent::new(AgentId(99), "Stranger", 1.0, Voice::Noisy).unwrap();
        let mut orch =
            Orchestrator::seeded(vec![stranger], MemoryStore::new(), Box::new(RuleBasedEngine::new()), 42).unwrap();
        let err = orch.run_with(u64::MAX, |_| {}).await.unwrap_err();
        assert!(err.is_store());
        assert_eq!(orch.tick(), 1);
    }
}

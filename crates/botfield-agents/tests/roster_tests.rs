//! Roster registration and decision-model properties.

use botfield_agents::prelude::*;
use botfield_runtime::MemoryStore;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn default_agents_get_sequential_ids() {
    let mut store = MemoryStore::new();
    let agents = spawn_default_agents(&mut store).unwrap();

    let ids: Vec<AgentId> = agents.iter().map(|a| a.id()).collect();
    assert_eq!(ids, [AgentId(1), AgentId(2), AgentId(3)]);

    let names: Vec<String> = store.agents().unwrap().into_iter().map(|a| a.name).collect();
    assert_eq!(names, ["PassiveAgent", "BalancedAgent", "NoisyAgent"]);
}

#[test]
fn invalid_roster_writes_nothing() {
    let mut store = MemoryStore::new();
    let personas = [
        Persona::new("Fine", 0.5, Voice::Balanced),
        Persona::new("Broken", 1.2, Voice::Noisy),
    ];

    let err = spawn_roster(&mut store, &personas).unwrap_err();
    assert!(matches!(err, BotfieldError::Config(ConfigError::OutOfRange { .. })));
    assert!(store.agents().unwrap().is_empty());
}

#[test]
fn empty_context_never_yields_reply() {
    let probabilities = [0.0, 0.1, 0.25, 0.5, 0.8, 0.99, 1.0];
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        for p in probabilities {
            let agent = Agent::new(AgentId(1), "Probe", p, Voice::Balanced).unwrap();
            for _ in 0..50 {
                assert_ne!(agent.decide_action(&[], &mut rng), Action::Reply, "p={p} seed={seed}");
            }
        }
    }
}

#[test]
fn acting_rate_tracks_probability() {
    let mut store = MemoryStore::new();
    let agents = spawn_default_agents(&mut store).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    for agent in &agents {
        let acted = (0..4000)
            .filter(|_| agent.decide_action(&[], &mut rng) != Action::Idle)
            .count() as f64
            / 4000.0;
        assert!(
            (acted - agent.post_probability()).abs() < 0.05,
            "{} acted {acted}",
            agent.name()
        );
    }
}

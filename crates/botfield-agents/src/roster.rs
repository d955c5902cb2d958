//! The default persona roster.
//!
//! A run starts by registering every persona with the store; the store
//! hands back the IDs the agents carry for the rest of the run.

use crate::agent::{validate_probability, Agent};
use botfield_core::error::Result;
use botfield_core::store::Store;
use botfield_core::types::Voice;
use serde::{Deserialize, Serialize};

/// Blueprint for an agent before it has a store-assigned ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub post_probability: f64,
    pub voice: Voice,
}

impl Persona {
    pub fn new(name: impl Into<String>, post_probability: f64, voice: Voice) -> Self {
        Self {
            name: name.into(),
            post_probability,
            voice,
        }
    }
}

/// The three baseline personas:
/// - Passive (10% post chance)
/// - Balanced (50% post chance)
/// - Noisy (80% post chance)
pub fn default_roster() -> Vec<Persona> {
    vec![
        Persona::new("PassiveAgent", 0.10, Voice::Passive),
        Persona::new("BalancedAgent", 0.50, Voice::Balanced),
        Persona::new("NoisyAgent", 0.80, Voice::Noisy),
    ]
}

/// Register each persona with the store and return the live agents,
/// in roster order.
///
/// Probabilities are validated before anything is written, so an invalid
/// roster leaves the store untouched.
pub fn spawn_roster<S: Store + ?Sized>(store: &mut S, personas: &[Persona]) -> Result<Vec<Agent>> {
    for persona in personas {
        validate_probability(persona.post_probability)?;
    }

    let mut agents = Vec::with_capacity(personas.len());
    for persona in personas {
        let id = store.insert_agent(&persona.name)?;
        agents.push(Agent::new(id, &persona.name, persona.post_probability, persona.voice)?);
    }
    Ok(agents)
}

/// Register the default roster.
pub fn spawn_default_agents<S: Store + ?Sized>(store: &mut S) -> Result<Vec<Agent>> {
    spawn_roster(store, &default_roster())
}

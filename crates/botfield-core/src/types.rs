//! Shared types used across all botfield crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Monotonic simulation step counter. The first tick of a run is 1.
pub type Tick = u64;

/// Structured event payload, persisted as a serialized JSON object.
pub type Metadata = serde_json::Map<String, Value>;

/// Reason code recorded when an agent stays idle.
pub const IDLE_REASON: &str = "probability_check_failed";

/// Number of recent posts an agent sees when deciding and generating.
pub const CONTEXT_LIMIT: usize = 5;

/// Identifier of an agent, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub i64);

/// Identifier of a post, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub i64);

/// Identifier of an event, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub i64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Behavioral category of a persona. Drives both post probability
/// (through the roster) and content templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Passive,
    Balanced,
    Noisy,
}

impl Voice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Passive => "passive",
            Voice::Balanced => "balanced",
            Voice::Noisy => "noisy",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "passive" => Ok(Voice::Passive),
            "balanced" => Ok(Voice::Balanced),
            "noisy" => Ok(Voice::Noisy),
            other => Err(format!("unknown voice '{other}'")),
        }
    }
}

/// What an agent decided to do on its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Write a fresh post.
    Post,
    /// Respond to the most recent post in context.
    Reply,
    /// Do nothing this tick.
    Idle,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Post => "post",
            Action::Reply => "reply",
            Action::Idle => "idle",
        }
    }

    /// Whether this action produces a post.
    pub fn creates_post(&self) -> bool {
        matches!(self, Action::Post | Action::Reply)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an event in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    AgentSelected,
    ActionDecided,
    PostCreated,
    AgentIdle,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::AgentSelected => "AGENT_SELECTED",
            ActionType::ActionDecided => "ACTION_DECIDED",
            ActionType::PostCreated => "POST_CREATED",
            ActionType::AgentIdle => "AGENT_IDLE",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AGENT_SELECTED" => Ok(ActionType::AgentSelected),
            "ACTION_DECIDED" => Ok(ActionType::ActionDecided),
            "POST_CREATED" => Ok(ActionType::PostCreated),
            "AGENT_IDLE" => Ok(ActionType::AgentIdle),
            other => Err(format!("unknown action type '{other}'")),
        }
    }
}

/// A registered agent row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: AgentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A post in the feed. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: AgentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Length of the content in characters.
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }
}

/// One entry of the append-only event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub tick: Tick,
    pub agent_id: AgentId,
    pub action_type: ActionType,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Integer metadata field, if present.
    pub fn metadata_i64(&self, key: &str) -> Option<i64> {
        self.metadata.get(key).and_then(Value::as_i64)
    }

    /// String metadata field, if present.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}

/// Typed form of the events the orchestrator records.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    AgentSelected {
        agent_name: String,
    },
    ActionDecided {
        decision: Action,
    },
    PostCreated {
        post_id: PostId,
        content_length: usize,
        /// Degradation reason when the content is a fallback text.
        degraded: Option<String>,
    },
    AgentIdle {
        reason: String,
    },
}

impl EventPayload {
    pub fn idle() -> Self {
        EventPayload::AgentIdle {
            reason: IDLE_REASON.to_string(),
        }
    }

    pub fn action_type(&self) -> ActionType {
        match self {
            EventPayload::AgentSelected { .. } => ActionType::AgentSelected,
            EventPayload::ActionDecided { .. } => ActionType::ActionDecided,
            EventPayload::PostCreated { .. } => ActionType::PostCreated,
            EventPayload::AgentIdle { .. } => ActionType::AgentIdle,
        }
    }

    /// Key-value form stored alongside the event.
    pub fn metadata(&self) -> Metadata {
        let value = match self {
            EventPayload::AgentSelected { agent_name } => json!({ "agent_name": agent_name }),
            EventPayload::ActionDecided { decision } => json!({ "decision": decision.as_str() }),
            EventPayload::PostCreated {
                post_id,
                content_length,
                degraded,
            } => {
                let mut v = json!({
                    "post_id": post_id.0,
                    "content_length": content_length,
                });
                if let Some(reason) = degraded {
                    v["degraded"] = json!(reason);
                }
                v
            }
            EventPayload::AgentIdle { reason } => json!({ "reason": reason }),
        };

        match value {
            Value::Object(map) => map,
            _ => Metadata::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_type_labels_round_trip() {
        for t in [
            ActionType::AgentSelected,
            ActionType::ActionDecided,
            ActionType::PostCreated,
            ActionType::AgentIdle,
        ] {
            assert_eq!(t.as_str().parse::<ActionType>().unwrap(), t);
        }
        assert!("POSTED".parse::<ActionType>().is_err());
    }

    #[test]
    fn post_created_metadata_omits_degraded_when_clean() {
        let payload = EventPayload::PostCreated {
            post_id: PostId(3),
            content_length: 27,
            degraded: None,
        };
        let meta = payload.metadata();
        assert_eq!(meta.get("post_id"), Some(&json!(3)));
        assert_eq!(meta.get("content_length"), Some(&json!(27)));
        assert!(!meta.contains_key("degraded"));
    }

    #[test]
    fn idle_payload_uses_fixed_reason() {
        let meta = EventPayload::idle().metadata();
        assert_eq!(meta.get("reason"), Some(&json!("probability_check_failed")));
        assert_eq!(EventPayload::idle().action_type(), ActionType::AgentIdle);
    }

    #[test]
    fn content_length_counts_characters() {
        let post = Post {
            id: PostId(1),
            author_id: AgentId(1),
            content: "café".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(post.content_length(), 4);
    }

    #[test]
    fn voice_parses_case_insensitively() {
        assert_eq!("Noisy".parse::<Voice>().unwrap(), Voice::Noisy);
        assert!("loud".parse::<Voice>().is_err());
    }
}

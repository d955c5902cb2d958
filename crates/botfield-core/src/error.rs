//! Error types for botfield operations.
//!
//! Content generation never surfaces errors here: degraded generation is
//! turned into fallback text by the content engine. What remains are store
//! faults, which abort a run, and configuration errors rejected at the
//! boundary before any simulation state exists.

use crate::types::AgentId;
use std::error::Error;
use std::fmt;

/// Result type for botfield operations.
pub type Result<T> = std::result::Result<T, BotfieldError>;

/// Errors that can occur during botfield operations.
#[derive(Debug, Clone)]
pub enum BotfieldError {
    /// Persistence errors. Fatal to a run.
    Store(StoreError),
    /// Configuration errors.
    Config(ConfigError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for BotfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotfieldError::Store(e) => write!(f, "Store error: {}", e),
            BotfieldError::Config(e) => write!(f, "Config error: {}", e),
            BotfieldError::Io(msg) => write!(f, "I/O error: {}", msg),
            BotfieldError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for BotfieldError {}

impl From<std::io::Error> for BotfieldError {
    fn from(e: std::io::Error) -> Self {
        BotfieldError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for BotfieldError {
    fn from(e: serde_json::Error) -> Self {
        BotfieldError::Serialization(e.to_string())
    }
}

/// Persistence errors.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// The backend rejected or failed an operation.
    Backend(String),
    /// A row referenced an agent that was never registered.
    UnknownAgent(AgentId),
    /// A stored row could not be decoded.
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "{}", msg),
            StoreError::UnknownAgent(id) => write!(f, "Unknown agent: {}", id),
            StoreError::Corrupt(msg) => write!(f, "Corrupt row: {}", msg),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(
                    f,
                    "{} out of range: {} (must be {}-{})",
                    field, value, min, max
                )
            }
        }
    }
}

// Convenience constructors
impl BotfieldError {
    pub fn store(msg: impl Into<String>) -> Self {
        BotfieldError::Store(StoreError::Backend(msg.into()))
    }

    pub fn unknown_agent(id: AgentId) -> Self {
        BotfieldError::Store(StoreError::UnknownAgent(id))
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        BotfieldError::Store(StoreError::Corrupt(msg.into()))
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BotfieldError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        BotfieldError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    /// Whether this error came from the persistence layer.
    pub fn is_store(&self) -> bool {
        matches!(self, BotfieldError::Store(_))
    }
}

/// Validate a requested step count.
///
/// Zero and negative counts are rejected so that callers can refuse a run
/// before opening a store or registering agents.
pub fn validate_steps(steps: i64) -> Result<u64> {
    if steps <= 0 {
        return Err(BotfieldError::invalid_config(
            "steps",
            steps.to_string(),
            "must be greater than 0",
        ));
    }
    Ok(steps as u64)
}

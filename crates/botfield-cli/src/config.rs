//! Configuration management for the botfield CLI.

use anyhow::{Context, Result};
use botfield::prelude::*;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Name of the project config file.
pub const CONFIG_FILE: &str = "botfield.toml";

/// Botfield project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub content: ContentConfig,
    /// Personas registered at the start of a run.
    #[serde(default = "default_roster")]
    pub agents: Vec<Persona>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

/// Which content engine a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Deterministic templates
    Rule,
    /// External command, prompt on stdin
    Process,
    /// Ollama HTTP API
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_engine")]
    pub engine: EngineKind,
    /// Command line for the process engine. Empty means `ollama run <model>`.
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_seed() -> u64 { 42 }
fn default_db_path() -> String { DEFAULT_DB_PATH.to_string() }
fn default_engine() -> EngineKind { EngineKind::Rule }
fn default_model() -> String { "llama2".to_string() }
fn default_endpoint() -> String { "http://localhost:11434".to_string() }
fn default_timeout_secs() -> u64 { 60 }

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            content: ContentConfig::default(),
            agents: default_roster(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            db_path: default_db_path(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            command: Vec::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from botfield.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load and validate config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Reject values no run could use.
    pub fn validate(&self) -> Result<()> {
        if self.agents.is_empty() {
            anyhow::bail!("at least one agent is required");
        }
        for persona in &self.agents {
            validate_probability(persona.post_probability)
                .with_context(|| format!("agent '{}'", persona.name))?;
        }
        if self.content.timeout_secs == 0 {
            anyhow::bail!("content.timeout_secs must be greater than 0");
        }
        Ok(())
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Build the content engine selected by `kind`.
    pub fn content_engine(&self, kind: EngineKind) -> Result<Box<dyn ContentEngine>> {
        let timeout = Duration::from_secs(self.content.timeout_secs);
        let engine: Box<dyn ContentEngine> = match kind {
            EngineKind::Rule => Box::new(RuleBasedEngine::new()),
            EngineKind::Process => {
                let generator = if self.content.command.is_empty() {
                    ProcessGenerator::ollama(&self.content.model)
                } else {
                    ProcessGenerator::from_command(&self.content.command)
                        .context("content.command must name a program")?
                };
                Box::new(GeneratedContentEngine::new(Arc::new(generator)).with_timeout(timeout))
            }
            EngineKind::Http => {
                let config = GeneratorConfig::ollama()
                    .with_model(&self.content.model)
                    .with_timeout(self.content.timeout_secs);
                let generator = OllamaHttpGenerator::with_config(&self.content.endpoint, config);
                Box::new(GeneratedContentEngine::new(Arc::new(generator)).with_timeout(timeout))
            }
        };
        Ok(engine)
    }
}

/// Find botfield.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

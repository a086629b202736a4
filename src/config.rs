//! Configuration loading from TOML.
//!
//! Every section carries serde defaults, so an empty file (or no file at
//! all) yields a working configuration: leaderboards of 10 rows, transfers
//! bounded at `2^32 - 1` with sender compensation enabled.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::engine::transfer::TransferConfig;
use crate::types::{Score, ScoreboardError, TransferRequest, DEFAULT_LEADERBOARD_LIMIT};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub scoreboard: ScoreboardConfig,
    pub logging: LoggingConfig,
    /// Objectives to create in the in-memory store at startup.
    pub seed: Vec<SeedObjective>,
    /// Transfers the demo binary runs after seeding.
    pub transfers: Vec<TransferRequest>,
}

/// Behavior of the scoreboard facade.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ScoreboardConfig {
    /// Row count used by `Scoreboard::top`.
    pub leaderboard_limit: usize,
    pub transfer: TransferConfig,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            transfer: TransferConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "scorekeep=info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedObjective {
    pub name: String,
    #[serde(default)]
    pub participants: Vec<SeedParticipant>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedParticipant {
    pub name: String,
    #[serde(default)]
    pub score: Score,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engines cannot honor.
    pub fn validate(&self) -> std::result::Result<(), ScoreboardError> {
        if self.scoreboard.transfer.max_score < 0 {
            return Err(ScoreboardError::Config(format!(
                "transfer.max_score must be non-negative, got {}",
                self.scoreboard.transfer.max_score
            )));
        }
        for objective in &self.seed {
            if objective.name.trim().is_empty() {
                return Err(ScoreboardError::Config(
                    "seed objective names must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

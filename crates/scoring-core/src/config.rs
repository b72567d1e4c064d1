use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::ScoringError;

/// Sector universe size assumed when the caller has no live figure.
pub const DEFAULT_SECTOR_UNIVERSE_SIZE: u32 = 50;

/// Engine-wide settings that callers may want to tune per deployment.
///
/// The engines themselves never read the environment. A caller builds this
/// once, from the environment with `from_env` or from any key source with
/// `from_lookup`, and threads it into the per-call options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of companies in the sector peer set, used by the IFS confidence factor
    pub sector_universe_size: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sector_universe_size: DEFAULT_SECTOR_UNIVERSE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Load from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sector_universe_size = match lookup("IFS_SECTOR_UNIVERSE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ScoringError::InvalidConfig(format!("{raw:?}: {e}")))
                .context("IFS_SECTOR_UNIVERSE_SIZE must be a non-negative integer")?,
            None => DEFAULT_SECTOR_UNIVERSE_SIZE,
        };

        let config = Self {
            sector_universe_size,
        };
        tracing::debug!("Engine config loaded: {:?}", config);
        Ok(config)
    }
}

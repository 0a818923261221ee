//! Engine configuration, read from TOML.
//!
//! ```toml
//! depth = 3
//! empty_node = "classify"   # or "sentinel"
//! engine = "minimax"        # or "random"
//! seed = 42                 # random engine only
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::random::RandomEngine;
use crate::{Engine, MinimaxEngine};

/// Search depth used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 3;

/// Deepest search accepted; cost grows exponentially with depth.
pub const MAX_DEPTH: u8 = 8;

/// What a search node returns when the side to move has no legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyNodePolicy {
    /// Checkmate scores as a mate for the opponent (sooner mates score
    /// higher), stalemate scores 0.
    #[default]
    Classify,
    /// Return the untouched max/min seed: -INFINITY for a maximizing node,
    /// +INFINITY for a minimizing one, whatever the reason for no moves.
    Sentinel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    #[default]
    Minimax,
    Random,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("search depth {0} is outside 1..={}", MAX_DEPTH)]
    InvalidDepth(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Plies searched for every engine move
    pub depth: u8,
    pub empty_node: EmptyNodePolicy,
    pub engine: EngineKind,
    /// Seed for the random engine; entropy when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            empty_node: EmptyNodePolicy::default(),
            engine: EngineKind::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if (1..=MAX_DEPTH).contains(&self.depth) {
            Ok(())
        } else {
            Err(ConfigError::InvalidDepth(self.depth))
        }
    }

    pub fn build_engine(&self) -> Box<dyn Engine> {
        match self.engine {
            EngineKind::Minimax => Box::new(MinimaxEngine::new(self.empty_node)),
            EngineKind::Random => Box::new(match self.seed {
                Some(seed) => RandomEngine::with_seed(seed),
                None => RandomEngine::new(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

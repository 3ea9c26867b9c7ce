//! Engine configuration, loaded from a caller-supplied TOML file.
//!
//! The engine runs embedded in a host service, so it never guesses at
//! config locations: the host hands [`load_engine_config`] a path and a
//! missing file simply means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub position: PositionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            position: PositionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionConfig {
    /// Clamp out-of-range reorder targets to the nearest valid slot
    /// instead of rejecting them.
    #[serde(default = "default_true")]
    pub clamp_out_of_range: bool,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            clamp_out_of_range: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Load engine configuration from `path`, defaulting when the file is
/// absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed as TOML.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<EngineConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

//! Simulation settings, loadable from JSON.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::automaton::grid::Boundary;
use crate::error::{EngineError, Result};
use crate::profile::GridProfile;

/// Frames between ticks when unset.
pub const DEFAULT_UPDATE_PERIOD: u32 = 6;

fn default_update_period() -> u32 {
    DEFAULT_UPDATE_PERIOD
}

fn default_paused() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub profile: GridProfile,
    #[serde(default)]
    pub boundary: Boundary,
    /// Frames per tick. Must be at least 1.
    #[serde(default = "default_update_period")]
    pub update_period: u32,
    /// Start paused.
    #[serde(default = "default_paused")]
    pub paused: bool,
    /// RNG seed. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            profile: GridProfile::default(),
            boundary: Boundary::default(),
            update_period: DEFAULT_UPDATE_PERIOD,
            paused: true,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<SimulationConfig> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!(?config, "loaded simulation config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.update_period == 0 {
            return Err(EngineError::InvalidPeriod);
        }
        Ok(())
    }
}

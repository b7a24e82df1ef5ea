//! Engine configuration loaded from TOML

use serde::{Deserialize, Serialize};
use spar_core::Result;
use std::path::Path;

/// Engine configuration. Every field has a default, so a partial (or
/// missing) config file still yields a runnable engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_width: i32,
    pub window_height: i32,
    pub target_fps: u32,
    pub brightness: i32,
    /// Round time limit in ticks; -1 is no limit.
    pub round_time: i32,
    pub life_mul: f32,
    pub team1_vs2_life: f32,
    pub turns_recovery_rate: f32,
    pub num_simul: [usize; 2],
    pub num_turns: [usize; 2],
    pub listen_port: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 480,
            target_fps: 60,
            brightness: 256,
            round_time: -1,
            life_mul: 1.0,
            team1_vs2_life: 1.0,
            turns_recovery_rate: 1.0 / 300.0,
            num_simul: [2, 2],
            num_turns: [2, 2],
            listen_port: "7500".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse configuration from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

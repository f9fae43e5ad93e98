//! Simulation configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "seed": 7, "grid_rows": 30, "colonist_count": 5 }
//! ```

use crate::error::SimError;
use dominion_logic::constants::DEFAULT_MOVEMENT_SPEED;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seeds both world generation and combat rolls.
    pub seed: u64,
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Scatter stone and water blobs over the dirt.
    pub generate_terrain: bool,
    /// Spawn trees, tools, weapons and animals.
    pub populate: bool,
    pub colonist_count: u32,
    pub colonist_health: f32,
    pub colonist_speed: f32,
    pub animal_speed: f32,
    /// Multiplier applied to every `update(dt)`.
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            grid_rows: 50,
            grid_cols: 50,
            generate_terrain: true,
            populate: true,
            colonist_count: 3,
            colonist_health: 40.0,
            colonist_speed: DEFAULT_MOVEMENT_SPEED,
            animal_speed: 0.1,
            time_scale: 1.0,
        }
    }
}

impl SimConfig {
    /// A bare world: open dirt, nothing spawned.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            grid_rows: rows,
            grid_cols: cols,
            generate_terrain: false,
            populate: false,
            colonist_count: 0,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.time_scale < 0.0 {
            return Err(SimError::Config(format!(
                "time_scale must not be negative, got {}",
                self.time_scale
            )));
        }
        if self.colonist_health <= 0.0 {
            return Err(SimError::Config(format!(
                "colonist_health must be positive, got {}",
                self.colonist_health
            )));
        }
        Ok(())
    }
}

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::level::Level;

/// Side length of one grid cell in field units
pub const CELL_SIZE: i32 = 10;
/// Field width in field units
pub const FIELD_WIDTH: i32 = 300;
/// Field height in field units
pub const FIELD_HEIGHT: i32 = 300;
pub const GRID_COLUMNS: i32 = FIELD_WIDTH / CELL_SIZE;
pub const GRID_ROWS: i32 = FIELD_HEIGHT / CELL_SIZE;
/// Largest power-up strength: one grid's worth of cells
pub const MAX_POWER_UP_STRENGTH: u32 = (GRID_COLUMNS * GRID_ROWS) as u32;

/// Options collected once before a game starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Obstacle layout and score multiplier
    pub level: Level,
    /// Base tick interval in milliseconds
    pub tick_ms: u64,
    /// How long timed power-ups last, in seconds
    pub power_up_duration_secs: u64,
    /// Magnitude of the lengthen, shorten and bonus power-ups
    pub power_up_strength: u32,
    /// Seed for food and power-up placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: Level::One,
            tick_ms: 100,
            power_up_duration_secs: 5,
            power_up_strength: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration for a level, keeping the other defaults
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.power_up_strength == 0 {
            return Err(ConfigError::ZeroStrength);
        }
        if self.power_up_strength > MAX_POWER_UP_STRENGTH {
            return Err(ConfigError::StrengthTooLarge(self.power_up_strength));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn power_up_duration(&self) -> Duration {
        Duration::from_secs(self.power_up_duration_secs)
    }

    /// Points awarded for one food at this level and speed
    pub fn food_points(&self) -> f64 {
        10.0 * self.level.score_multiplier() * 100.0 / self.tick_ms as f64
    }
}

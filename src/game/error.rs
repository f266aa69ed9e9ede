//! Configuration errors

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown level {0}: expected a level between 1 and 5")]
    InvalidLevel(u8),

    #[error("Tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("Power-up strength must be greater than zero")]
    ZeroStrength,

    #[error("Power-up strength {0} exceeds the {max} cells of the grid", max = super::config::MAX_POWER_UP_STRENGTH)]
    StrengthTooLarge(u32),

    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

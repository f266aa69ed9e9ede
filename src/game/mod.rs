//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! States advance through [`GameEngine::step`] and are projected to paint
//! instructions with [`draw_commands`].

pub mod action;
pub mod config;
pub mod draw;
pub mod engine;
pub mod error;
pub mod level;
pub mod powerup;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{
    CELL_SIZE, FIELD_HEIGHT, FIELD_WIDTH, GRID_COLUMNS, GRID_ROWS, GameConfig,
    MAX_POWER_UP_STRENGTH,
};
pub use draw::{DrawCommand, Paint, draw_commands};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::ConfigError;
pub use level::Level;
pub use powerup::{PowerUp, SpeedEffect};
pub use state::{CollisionType, GamePhase, GameState, Modifiers, Position, Snake};

//! Power Snake - Snake with levels, obstacles and randomized power-ups
//!
//! This library provides:
//! - Core game logic: a step function over plain game states plus a render projection (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering of the draw commands (render module)
//! - In-memory score table (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

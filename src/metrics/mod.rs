pub mod game_metrics;

pub use game_metrics::{GameMetrics, SCORE_TABLE_SIZE};

//! Level catalog
//!
//! Each level is a fixed obstacle layout paired with a score multiplier.
//! Higher levels are more crowded and pay more per food.

use serde::{Deserialize, Serialize};

use super::config::{CELL_SIZE, GRID_COLUMNS, GRID_ROWS};
use super::error::ConfigError;
use super::state::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    /// Open field
    #[default]
    One,
    /// Two vertical walls
    Two,
    /// Two horizontal bars and a center pillar
    Three,
    /// Border with an opening on every side
    Four,
    /// Border with openings plus a central cross
    Five,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::One,
        Level::Two,
        Level::Three,
        Level::Four,
        Level::Five,
    ];

    pub fn number(&self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
            Level::Four => 4,
            Level::Five => 5,
        }
    }

    pub fn score_multiplier(&self) -> f64 {
        match self {
            Level::One => 1.0,
            Level::Two => 1.5,
            Level::Three => 2.0,
            Level::Four => 2.5,
            Level::Five => 3.0,
        }
    }

    /// Obstacle cells in field units
    pub fn obstacles(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        match self {
            Level::One => {}
            Level::Two => {
                vertical(&mut cells, 10, 8..22);
                vertical(&mut cells, 19, 8..22);
            }
            Level::Three => {
                horizontal(&mut cells, 7, 5..25);
                horizontal(&mut cells, 22, 5..25);
                vertical(&mut cells, 15, 11..19);
            }
            Level::Four => border(&mut cells),
            Level::Five => {
                border(&mut cells);
                horizontal(&mut cells, 15, 8..22);
                vertical(&mut cells, 15, 8..15);
                vertical(&mut cells, 15, 16..22);
            }
        }
        cells
    }
}

impl TryFrom<u8> for Level {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            4 => Ok(Level::Four),
            5 => Ok(Level::Five),
            other => Err(ConfigError::InvalidLevel(other)),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.number()
    }
}

fn cell(column: i32, row: i32) -> Position {
    Position::new(column * CELL_SIZE, row * CELL_SIZE)
}

fn horizontal(cells: &mut Vec<Position>, row: i32, columns: std::ops::Range<i32>) {
    cells.extend(columns.map(|column| cell(column, row)));
}

fn vertical(cells: &mut Vec<Position>, column: i32, rows: std::ops::Range<i32>) {
    cells.extend(rows.map(|row| cell(column, row)));
}

// Outer frame with a four-cell opening in the middle of each side.
fn border(cells: &mut Vec<Position>) {
    let last_column = GRID_COLUMNS - 1;
    let last_row = GRID_ROWS - 1;
    let gap = (GRID_COLUMNS / 2 - 2)..(GRID_COLUMNS / 2 + 2);

    for column in (0..GRID_COLUMNS).filter(|c| !gap.contains(c)) {
        cells.push(cell(column, 0));
        cells.push(cell(column, last_row));
    }
    for row in (1..last_row).filter(|r| !gap.contains(r)) {
        cells.push(cell(0, row));
        cells.push(cell(last_column, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{FIELD_HEIGHT, FIELD_WIDTH};
    use crate::game::state::Snake;
    use std::collections::HashSet;

    #[test]
    fn test_level_numbers_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::try_from(level.number()).unwrap(), level);
        }
        assert!(matches!(
            Level::try_from(0),
            Err(ConfigError::InvalidLevel(0))
        ));
        assert!(matches!(
            Level::try_from(6),
            Err(ConfigError::InvalidLevel(6))
        ));
    }

    #[test]
    fn test_score_multipliers() {
        let multipliers: Vec<f64> = Level::ALL.iter().map(|l| l.score_multiplier()).collect();
        assert_eq!(multipliers, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn test_first_level_is_open() {
        assert!(Level::One.obstacles().is_empty());
    }

    #[test]
    fn test_obstacles_are_grid_aligned_and_in_bounds() {
        for level in Level::ALL {
            for pos in level.obstacles() {
                assert_eq!(pos.x % CELL_SIZE, 0, "{level:?} {pos:?}");
                assert_eq!(pos.y % CELL_SIZE, 0, "{level:?} {pos:?}");
                assert!(pos.x >= 0 && pos.x < FIELD_WIDTH, "{level:?} {pos:?}");
                assert!(pos.y >= 0 && pos.y < FIELD_HEIGHT, "{level:?} {pos:?}");
            }
        }
    }

    #[test]
    fn test_obstacles_are_unique() {
        for level in Level::ALL {
            let cells = level.obstacles();
            let unique: HashSet<_> = cells.iter().collect();
            assert_eq!(unique.len(), cells.len(), "{level:?} has duplicates");
        }
    }

    #[test]
    fn test_starting_snake_is_clear_of_obstacles() {
        let snake = Snake::starting();
        for level in Level::ALL {
            let obstacles = level.obstacles();
            assert!(
                snake.body.iter().all(|segment| !obstacles.contains(segment)),
                "{level:?} overlaps the starting snake"
            );
        }
    }

    #[test]
    fn test_level_serializes_as_number() {
        let json = serde_json::to_string(&Level::Three).unwrap();
        assert_eq!(json, "3");
        let level: Level = serde_json::from_str("5").unwrap();
        assert_eq!(level, Level::Five);
        assert!(serde_json::from_str::<Level>("9").is_err());
    }
}

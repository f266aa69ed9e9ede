use std::sync::Arc;
use std::time::Duration;

use super::action::Direction;
use super::config::{CELL_SIZE, FIELD_HEIGHT, FIELD_WIDTH};
use super::level::Level;
use super::powerup::SpeedEffect;

/// A cell on the game grid, in field units (multiples of `CELL_SIZE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell in a direction, wrapping around the field edges
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy).wrapped()
    }

    /// Fold the position back onto the field (toroidal topology)
    pub fn wrapped(&self) -> Self {
        Self {
            x: self.x.rem_euclid(FIELD_WIDTH),
            y: self.y.rem_euclid(FIELD_HEIGHT),
        }
    }

    pub fn is_in_bounds(&self) -> bool {
        (0..FIELD_WIDTH).contains(&self.x) && (0..FIELD_HEIGHT).contains(&self.y)
    }

    pub fn is_grid_aligned(&self) -> bool {
        self.x % CELL_SIZE == 0 && self.y % CELL_SIZE == 0
    }

    /// Grid column and row of this cell
    pub fn cell_index(&self) -> (usize, usize) {
        ((self.x / CELL_SIZE) as usize, (self.y / CELL_SIZE) as usize)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let back = direction.opposite();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_in_direction(back));
        }

        Self { body, direction }
    }

    /// Six segments in the second column, head at (10, 60), heading down
    pub fn starting() -> Self {
        Self::new(Position::new(10, 60), Direction::Down, 6)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// True when the head shares a cell with any other segment
    pub fn is_self_intersecting(&self) -> bool {
        self.collides_with_body(self.head())
    }

    /// Move snake in current direction, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Per-segment step that continues the tail outward
    pub fn tail_direction(&self) -> (i32, i32) {
        match self.body.len() {
            0 | 1 => self.direction.opposite().delta(),
            len => {
                let last = self.body[len - 1];
                let before = self.body[len - 2];
                let (dx, dy) = (last.x - before.x, last.y - before.y);
                // A tail that just wrapped spans the whole field; fold it back to one cell.
                (fold_step(dx, FIELD_WIDTH), fold_step(dy, FIELD_HEIGHT))
            }
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a snake built by the engine: at least the head remains
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

fn fold_step(delta: i32, extent: i32) -> i32 {
    if delta > CELL_SIZE {
        delta - extent
    } else if delta < -CELL_SIZE {
        delta + extent
    } else {
        delta
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake ran into an obstacle without wall phase
    Obstacle,
    /// Snake hit itself
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Ended,
}

/// Timed power-up effects currently in play
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Modifiers {
    /// Remaining wall-phase time
    pub wall_phase: Option<Duration>,
    /// Active speed effect and its remaining time
    pub speed: Option<(SpeedEffect, Duration)>,
}

impl Modifiers {
    pub fn can_phase_through_walls(&self) -> bool {
        self.wall_phase.is_some()
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed
            .map(|(effect, _)| effect.multiplier())
            .unwrap_or(1.0)
    }

    /// Consume `elapsed` from every running timer, dropping the ones that run out
    pub fn advance(&mut self, elapsed: Duration) {
        self.wall_phase = self.wall_phase.and_then(|left| remaining(left, elapsed));
        self.speed = self
            .speed
            .and_then(|(effect, left)| remaining(left, elapsed).map(|left| (effect, left)));
    }
}

fn remaining(left: Duration, elapsed: Duration) -> Option<Duration> {
    left.checked_sub(elapsed).filter(|left| !left.is_zero())
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: GamePhase,
    pub snake: Snake,
    pub food: Option<Position>,
    pub power_up: Option<Position>,
    pub level: Level,
    pub obstacles: Arc<[Position]>,
    pub modifiers: Modifiers,
    /// Configured tick interval before speed effects
    pub base_interval: Duration,
    pub score: u32,
    /// Food eaten since the last power-up spawned
    pub food_streak: u32,
    pub steps: u32,
}

impl GameState {
    /// Create a game that has not started yet
    pub fn new(snake: Snake, level: Level, base_interval: Duration) -> Self {
        Self {
            phase: GamePhase::Idle,
            snake,
            food: None,
            power_up: None,
            level,
            obstacles: level.obstacles().into(),
            modifiers: Modifiers::default(),
            base_interval,
            score: 0,
            food_streak: 0,
            steps: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    /// Snake or obstacle on this cell
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.is_occupied_by_snake(pos) || self.is_obstacle(pos)
    }

    /// Time until the next tick, including any speed effect
    pub fn tick_interval(&self) -> Duration {
        match self.modifiers.speed {
            Some((effect, _)) => effect.scale(self.base_interval),
            None => self.base_interval,
        }
    }
}

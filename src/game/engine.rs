use super::{
    action::Action,
    config::{CELL_SIZE, GRID_COLUMNS, GRID_ROWS, GameConfig, MAX_POWER_UP_STRENGTH},
    powerup::{PowerUp, SpeedEffect},
    state::{CollisionType, GamePhase, GameState, Position, Snake},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Food eaten between two power-up spawns
pub const FOOD_PER_POWER_UP: u32 = 3;

/// Random rolls before placement falls back to scanning the grid
const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Effect applied if a power-up was collected this step
    pub power_up: Option<PowerUp>,
    /// Points gained this step
    pub score_delta: u32,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            info: StepInfo {
                ate_food: false,
                power_up: None,
                score_delta: 0,
                collision_type: None,
            },
        }
    }
}

/// The game engine that handles all game logic
///
/// The engine owns the configuration and the random source; game states are
/// plain values passed through [`GameEngine::step`].
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A fresh game waiting for its start signal
    pub fn idle(&self) -> GameState {
        GameState::new(
            Snake::starting(),
            self.config.level,
            self.config.tick_interval(),
        )
    }

    /// Start a new game: fresh snake, modifiers and score, one food on the field
    pub fn start(&mut self) -> GameState {
        let mut state = self.idle();
        state.phase = GamePhase::Running;
        state.food = self.place_item(&state, None);

        info!(
            level = self.config.level.number(),
            tick_ms = self.config.tick_ms,
            "game started"
        );

        state
    }

    /// Advance the game by one tick
    ///
    /// Idle and ended games are returned unchanged.
    pub fn step(&mut self, state: &GameState, action: Action) -> (GameState, StepResult) {
        if !state.is_alive() {
            return (
                state.clone(),
                StepResult::idle(state.phase == GamePhase::Ended),
            );
        }

        let mut next = state.clone();

        // Time for this tick has passed; run down the timed effects.
        next.modifiers.advance(state.tick_interval());

        // Update direction based on action (prevent 180° turns)
        if let Action::Move(direction) = action {
            if !next.snake.direction.is_opposite(direction) {
                next.snake.direction = direction;
            }
        }

        let new_head = next.snake.head().moved_in_direction(next.snake.direction);
        let ate_food = next.food == Some(new_head);
        let took_power_up = next.power_up == Some(new_head);

        next.snake.move_snake(ate_food);

        if ate_food {
            next.score = add_points(next.score, self.config.food_points());
            next.food = self.place_item(&next, next.power_up);
            next.food_streak += 1;

            if next.food_streak == FOOD_PER_POWER_UP {
                next.power_up = self.place_item(&next, next.food);
                next.food_streak = 0;
            }
        }

        let mut power_up = None;
        if took_power_up {
            let effect = PowerUp::random(&mut self.rng);
            next.power_up = None;
            self.apply_power_up(&mut next, effect);
            power_up = Some(effect);
        }

        next.steps += 1;

        let collision_type = self.check_collision(&next);
        if let Some(collision) = collision_type {
            next.phase = GamePhase::Ended;
            info!(score = next.score, steps = next.steps, ?collision, "game over");
        }

        let result = StepResult {
            terminated: collision_type.is_some(),
            info: StepInfo {
                ate_food,
                power_up,
                score_delta: next.score.saturating_sub(state.score),
                collision_type,
            },
        };

        (next, result)
    }

    /// Apply a power-up effect to the state
    pub fn apply_power_up(&self, state: &mut GameState, effect: PowerUp) {
        // Unvalidated configs are clamped to one grid's worth of cells
        let strength = self.config.power_up_strength.min(MAX_POWER_UP_STRENGTH);
        let duration = self.config.power_up_duration();

        match effect {
            PowerUp::WallPhase => {
                state.modifiers.wall_phase = Some(duration);
            }
            PowerUp::BonusScore => {
                let points = self.config.food_points() * f64::from(strength);
                state.score = add_points(state.score, points);
            }
            PowerUp::Lengthen => {
                let (dx, dy) = state.snake.tail_direction();
                let tail = state.snake.tail();
                for i in 1..=strength as i32 {
                    state
                        .snake
                        .body
                        .push(tail.moved_by(dx * i, dy * i).wrapped());
                }
            }
            PowerUp::Shorten => {
                let keep = state.snake.len().saturating_sub(strength as usize).max(1);
                state.snake.body.truncate(keep);
            }
            PowerUp::SpeedUp => {
                state.modifiers.speed = Some((SpeedEffect::Fast, duration));
            }
            PowerUp::SlowDown => {
                state.modifiers.speed = Some((SpeedEffect::Slow, duration));
            }
        }

        debug!(
            effect = effect.name(),
            length = state.snake.len(),
            score = state.score,
            "power-up applied"
        );
    }

    /// Check whether the head now shares its cell with the body or an obstacle
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        if state.snake.is_self_intersecting() {
            return Some(CollisionType::SelfCollision);
        }

        if state.is_obstacle(state.snake.head()) && !state.modifiers.can_phase_through_walls() {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    /// Pick a random cell that is free of snake, obstacles and `avoid`
    fn place_item(&mut self, state: &GameState, avoid: Option<Position>) -> Option<Position> {
        let is_free = |pos: Position| !state.is_blocked(pos) && Some(pos) != avoid;

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let pos = self.random_cell();
            if is_free(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..GRID_ROWS)
            .flat_map(|row| {
                (0..GRID_COLUMNS).map(move |column| Position::new(column * CELL_SIZE, row * CELL_SIZE))
            })
            .filter(|&pos| is_free(pos))
            .collect();

        if free.is_empty() {
            warn!(snake_length = state.snake.len(), "no free cell left for placement");
            return None;
        }

        Some(free[self.rng.gen_range(0..free.len())])
    }

    fn random_cell(&mut self) -> Position {
        let column = self.rng.gen_range(0..GRID_COLUMNS);
        let row = self.rng.gen_range(0..GRID_ROWS);
        Position::new(column * CELL_SIZE, row * CELL_SIZE)
    }
}

fn add_points(score: u32, points: f64) -> u32 {
    (f64::from(score) + points).floor() as u32
}

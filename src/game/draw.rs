//! Render projection
//!
//! Turns a [`GameState`] into a flat list of cell paint instructions. Front-ends
//! paint the commands in order; later commands cover earlier ones.

use super::state::{GameState, Position};

/// Named colors used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    LightBlue,
    DarkBlue,
    Purple,
    Red,
    DarkRed,
    LightGreen,
    DarkGreen,
    Grey,
    Black,
}

/// Fill one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub cell: Position,
    pub fill: Paint,
    pub stroke: Paint,
}

impl DrawCommand {
    fn new(cell: Position, fill: Paint, stroke: Paint) -> Self {
        Self { cell, fill, stroke }
    }
}

/// Obstacles, then food, then the power-up, then the snake head-first
pub fn draw_commands(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(state.obstacles.len() + state.snake.len() + 2);

    commands.extend(
        state
            .obstacles
            .iter()
            .map(|&cell| DrawCommand::new(cell, Paint::Grey, Paint::Black)),
    );

    if let Some(food) = state.food {
        commands.push(DrawCommand::new(food, Paint::Red, Paint::DarkRed));
    }

    if let Some(power_up) = state.power_up {
        commands.push(DrawCommand::new(power_up, Paint::LightGreen, Paint::DarkGreen));
    }

    let snake_fill = if state.modifiers.can_phase_through_walls() {
        Paint::Purple
    } else {
        Paint::LightBlue
    };
    commands.extend(
        state
            .snake
            .body
            .iter()
            .map(|&cell| DrawCommand::new(cell, snake_fill, Paint::DarkBlue)),
    );

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::Level;
    use crate::game::state::Snake;
    use std::time::Duration;

    #[test]
    fn test_command_order_and_colors() {
        let mut state = GameState::new(Snake::starting(), Level::Two, Duration::from_millis(100));
        state.food = Some(Position::new(200, 200));
        state.power_up = Some(Position::new(250, 250));

        let commands = draw_commands(&state);
        let obstacles = state.obstacles.len();

        assert_eq!(commands.len(), obstacles + 2 + 6);
        assert!(commands[..obstacles].iter().all(|c| c.fill == Paint::Grey));
        assert_eq!(
            commands[obstacles],
            DrawCommand::new(Position::new(200, 200), Paint::Red, Paint::DarkRed)
        );
        assert_eq!(
            commands[obstacles + 1],
            DrawCommand::new(Position::new(250, 250), Paint::LightGreen, Paint::DarkGreen)
        );
        assert_eq!(commands[obstacles + 2].cell, Position::new(10, 60));
        assert!(
            commands[obstacles + 2..]
                .iter()
                .all(|c| c.fill == Paint::LightBlue && c.stroke == Paint::DarkBlue)
        );
    }

    #[test]
    fn test_absent_items_are_not_drawn() {
        let state = GameState::new(Snake::starting(), Level::One, Duration::from_millis(100));
        let commands = draw_commands(&state);
        assert_eq!(commands.len(), 6);
    }

    #[test]
    fn test_wall_phase_tints_snake() {
        let mut state = GameState::new(Snake::starting(), Level::One, Duration::from_millis(100));
        state.modifiers.wall_phase = Some(Duration::from_secs(1));

        let commands = draw_commands(&state);
        assert!(commands.iter().all(|c| c.fill == Paint::Purple));
    }
}

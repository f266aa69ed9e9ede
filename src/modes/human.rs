use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep};
use tracing::{debug, info};

use crate::game::{Action, Direction, GameConfig, GameEngine, GamePhase, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    show_scores: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let engine = GameEngine::new(config);
        let state = engine.idle();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            show_scores: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The tick timer re-arms after every tick so speed effects apply immediately
        let tick_timer = sleep(self.state.tick_interval());
        tokio::pin!(tick_timer);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                () = &mut tick_timer => {
                    self.update_game();
                    tick_timer.as_mut().reset(Instant::now() + self.state.tick_interval());
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.state.is_alive() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, self.show_scores);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_key_action(action);
        }
    }

    fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => {
                // One direction change per tick; later presses wait for the next tick
                if self.pending_direction.is_none() {
                    self.pending_direction = Some(direction);
                }
            }
            KeyAction::Start => {
                if self.state.phase != GamePhase::Running {
                    self.start_game();
                }
            }
            KeyAction::Restart => {
                self.start_game();
            }
            KeyAction::ToggleScores => {
                self.show_scores = !self.show_scores;
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        // The score table covers the field; the game waits until it is closed
        if !self.state.is_alive() || self.show_scores {
            return;
        }

        let action = Action::from(self.pending_direction.take());

        let (next, result) = self.engine.step(&self.state, action);
        self.state = next;

        if let Some(effect) = result.info.power_up {
            debug!(effect = effect.name(), "power-up collected");
        }

        // Track game over
        if result.terminated {
            self.metrics.on_game_over(self.state.score);
            info!(
                score = self.state.score,
                best = self.metrics.high_score(),
                games = self.metrics.games_played,
                "score archived"
            );
        }
    }

    fn start_game(&mut self) {
        self.state = self.engine.start();
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.show_scores = false;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};

    fn seeded_mode() -> HumanMode {
        HumanMode::new(GameConfig {
            seed: Some(3),
            ..Default::default()
        })
    }

    #[test]
    fn test_game_initialization() {
        let mode = seeded_mode();
        assert_eq!(mode.state.phase, GamePhase::Idle);
        assert_eq!(mode.state.score, 0);
    }

    #[test]
    fn test_start_key_starts_game() {
        let mut mode = seeded_mode();
        mode.apply_key_action(KeyAction::Start);
        assert!(mode.state.is_alive());
        assert!(mode.state.food.is_some());
    }

    #[test]
    fn test_game_reset() {
        let mut mode = seeded_mode();
        mode.state.score = 10;
        mode.state.phase = GamePhase::Ended;
        mode.apply_key_action(KeyAction::Restart);
        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_alive());
    }

    #[test]
    fn test_first_direction_per_tick_wins() {
        let mut mode = seeded_mode();
        mode.apply_key_action(KeyAction::Start);
        mode.state.food = None;

        mode.apply_key_action(KeyAction::Steer(Direction::Right));
        mode.apply_key_action(KeyAction::Steer(Direction::Up));
        mode.update_game();

        assert_eq!(mode.state.snake.direction, Direction::Right);
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_game_over_archives_score() {
        let mut mode = seeded_mode();
        mode.apply_key_action(KeyAction::Start);
        mode.state.food = None;
        mode.state.score = 42;
        // Heading left into its own body at (40, 50)
        mode.state.snake = Snake {
            body: vec![
                Position::new(50, 50),
                Position::new(50, 60),
                Position::new(40, 60),
                Position::new(40, 50),
                Position::new(40, 40),
            ],
            direction: Direction::Left,
        };

        mode.update_game();

        assert_eq!(mode.state.phase, GamePhase::Ended);
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.top(1), vec![42]);

        // Ended games do not archive again
        mode.update_game();
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_score_table_pauses_running_game() {
        let mut mode = seeded_mode();
        mode.apply_key_action(KeyAction::Start);
        mode.state.food = None;
        let head = mode.state.snake.head();

        mode.apply_key_action(KeyAction::ToggleScores);
        for _ in 0..5 {
            mode.update_game();
        }
        assert_eq!(mode.state.steps, 0);
        assert_eq!(mode.state.snake.head(), head);

        mode.apply_key_action(KeyAction::ToggleScores);
        mode.update_game();
        assert_eq!(mode.state.steps, 1);
        assert_eq!(mode.state.snake.head(), Position::new(10, 70));
    }

    #[test]
    fn test_toggle_scores() {
        let mut mode = seeded_mode();
        mode.apply_key_action(KeyAction::ToggleScores);
        assert!(mode.show_scores);
        mode.apply_key_action(KeyAction::ToggleScores);
        assert!(!mode.show_scores);
    }
}

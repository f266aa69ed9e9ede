use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{
    DrawCommand, GRID_COLUMNS, GRID_ROWS, GamePhase, GameState, Paint, draw_commands,
};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        show_scores: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if show_scores {
            frame.render_widget(self.render_score_table(metrics), game_area);
        } else if state.phase == GamePhase::Ended {
            frame.render_widget(self.render_game_over(state), game_area);
        } else {
            frame.render_widget(self.render_grid(state), game_area);
        }

        let controls = self.render_controls(state.phase);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let cells = paint_grid(&draw_commands(state));

        let lines: Vec<Line> = cells
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some((fill, stroke)) => Span::styled(
                            "[]",
                            Style::default().fg(to_color(*stroke)).bg(to_color(*fill)),
                        ),
                        None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = if state.phase == GamePhase::Idle {
            " Snake - press Enter to start "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score().to_string(), value),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(
                format!(
                    "{} (x{:.1})",
                    state.level.number(),
                    state.level.score_multiplier()
                ),
                value,
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ];

        if let Some(left) = state.modifiers.wall_phase {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("Wall phase {:.1}s", left.as_secs_f32()),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        if let Some((effect, left)) = state.modifiers.speed {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("Speed x{:.1} {:.1}s", effect.multiplier(), left.as_secs_f32()),
                Style::default().fg(Color::Cyan),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_score_table(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SCORE TABLE",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        text.extend(
            metrics
                .score_table()
                .into_iter()
                .map(|row| Line::from(Span::styled(row, Style::default().fg(Color::White)))),
        );
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            format!("Games played: {}", metrics.games_played),
            Style::default().fg(Color::Gray),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_controls(&self, phase: GamePhase) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
        ];
        if phase != GamePhase::Running {
            spans.push(Span::styled("Enter", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" to start | "));
        }
        spans.extend([
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" scores | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Paint the commands onto a row-major grid; later commands win
fn paint_grid(commands: &[DrawCommand]) -> Vec<Vec<Option<(Paint, Paint)>>> {
    let mut grid = vec![vec![None; GRID_COLUMNS as usize]; GRID_ROWS as usize];
    for command in commands {
        let (column, row) = command.cell.cell_index();
        if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = Some((command.fill, command.stroke));
        }
    }
    grid
}

fn to_color(paint: Paint) -> Color {
    match paint {
        Paint::LightBlue => Color::Rgb(173, 216, 230),
        Paint::DarkBlue => Color::Rgb(0, 0, 139),
        Paint::Purple => Color::Rgb(128, 0, 128),
        Paint::Red => Color::Rgb(255, 0, 0),
        Paint::DarkRed => Color::Rgb(139, 0, 0),
        Paint::LightGreen => Color::Rgb(144, 238, 144),
        Paint::DarkGreen => Color::Rgb(0, 100, 0),
        Paint::Grey => Color::Rgb(128, 128, 128),
        Paint::Black => Color::Rgb(0, 0, 0),
    }
}

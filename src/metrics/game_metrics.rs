use std::time::{Duration, Instant};

/// Ranks shown in the score table
pub const SCORE_TABLE_SIZE: usize = 5;

/// Session statistics kept in memory for the lifetime of the process
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    scores: Vec<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            scores: Vec::new(),
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Archive the final score of a finished game
    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.scores.push(final_score);
    }

    pub fn high_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    /// Best `n` scores, highest first
    pub fn top(&self, n: usize) -> Vec<u32> {
        let mut sorted = self.scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.truncate(n);
        sorted
    }

    /// One line per rank, `-` where no game has been recorded
    pub fn score_table(&self) -> Vec<String> {
        let top = self.top(SCORE_TABLE_SIZE);
        (0..SCORE_TABLE_SIZE)
            .map(|rank| match top.get(rank) {
                Some(score) => format!("{}: {}", rank + 1, score),
                None => format!("{}: -", rank + 1),
            })
            .collect()
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

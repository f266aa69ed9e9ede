use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use power_snake::game::{GameConfig, Level, MAX_POWER_UP_STRENGTH};
use power_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "power_snake")]
#[command(version, about = "Snake with levels, obstacles and power-ups")]
struct Cli {
    /// Level 1-5: obstacle layout and score multiplier
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    level: Option<u8>,

    /// Tick interval in milliseconds (lower is faster)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    speed: Option<u64>,

    /// How long timed power-ups last, in seconds
    #[arg(long)]
    powerup_duration: Option<u64>,

    /// Magnitude of the lengthen, shorten and bonus power-ups
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_POWER_UP_STRENGTH)))]
    powerup_strength: Option<u32>,

    /// Seed for food and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with game options; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl Cli {
    /// Start from the config file (or defaults) and apply explicit flags on top
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(level) = self.level {
            config.level = Level::try_from(level)?;
        }
        if let Some(speed) = self.speed {
            config.tick_ms = speed;
        }
        if let Some(duration) = self.powerup_duration {
            config.power_up_duration_secs = duration;
        }
        if let Some(strength) = self.powerup_strength {
            config.power_up_strength = strength;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(path: &Path, level: LogLevel) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path, cli.log_level)?;
    }

    let config = cli.game_config().context("Invalid game options")?;
    tracing::info!(?config, "options collected");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use env_logger::{Env, Target};
use grid_snake::config::SessionConfig;
use grid_snake::error::AppError;
use grid_snake::game::GameSession;
use grid_snake::input::{GameInput, poll_input};
use grid_snake::renderer;
use grid_snake::settings::load_settings;
use grid_snake::terminal_runtime::{AppTerminal, TerminalGuard};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board width in points.
    #[arg(long)]
    width: Option<i32>,
    /// Board height in points.
    #[arg(long)]
    height: Option<i32>,
    /// Size of one grid cell in points.
    #[arg(long = "grid-unit")]
    grid_unit: Option<i32>,
    /// Milliseconds between two ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,
    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Write log output to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(width) = self.width {
            config.board.width = width;
        }
        if let Some(height) = self.height {
            config.board.height = height;
        }
        if let Some(grid_unit) = self.grid_unit {
            config.board.grid_unit = grid_unit;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli) {
        eprintln!("Failed to open log file: {error}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) -> std::io::Result<()> {
    let default_filter = if cli.log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));
    if let Some(path) = &cli.log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.apply_overrides(load_settings(cli.config.as_deref())?);
    config.validate()?;

    let mut session = new_session(config, cli.seed)?;
    let mut guard = TerminalGuard::enter()?;
    let terminal = guard.terminal_mut();
    let tick_interval = config.tick_interval();
    let mut next_tick = Instant::now() + tick_interval;

    loop {
        draw(terminal, &session)?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if let Some(input) = poll_input(timeout)? {
            match input {
                GameInput::Quit => break,
                GameInput::Direction(direction) => session.change_direction(direction),
                GameInput::Restart if session.is_over() => {
                    session = new_session(config, cli.seed)?;
                    next_tick = Instant::now() + tick_interval;
                }
                GameInput::Restart => {}
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            session.tick();
            next_tick = advance_deadline(next_tick, now, tick_interval);
        }
    }

    log::info!("quit with score {}", session.score());
    Ok(())
}

fn new_session(config: SessionConfig, seed: Option<u64>) -> Result<GameSession, AppError> {
    let session = match seed {
        Some(seed) => GameSession::new_with_seed(config, seed)?,
        None => GameSession::new(config)?,
    };
    Ok(session)
}

fn draw(terminal: &mut AppTerminal, session: &GameSession) -> Result<(), AppError> {
    terminal.draw(|frame| renderer::render(frame, session))?;
    Ok(())
}

/// Next tick deadline on the fixed grid, skipping ticks missed while stalled.
fn advance_deadline(deadline: Instant, now: Instant, interval: Duration) -> Instant {
    let next = deadline + interval;
    if next <= now { now + interval } else { next }
}

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use arena_snake::app::{App, AppError};
use arena_snake::audio::TerminalBell;
use arena_snake::config::{FRAME_INTERVAL_MS, GameConfig};
use arena_snake::logging;
use arena_snake::renderer;
use arena_snake::score::{HighScores, scores_path};
use arena_snake::terminal_runtime::TerminalSession;
use clap::Parser;
use crossterm::event::{self, Event};
use log::{error, info, warn};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Read settings from this JSON file instead of the user config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arena width in display units.
    #[arg(long)]
    width: Option<u16>,

    /// Arena height in display units.
    #[arg(long)]
    height: Option<u16>,

    /// Display units per grid cell.
    #[arg(long = "cell-size")]
    cell_size: Option<u16>,

    /// Wall border thickness in grid cells.
    #[arg(long)]
    border: Option<u16>,

    /// Simulation tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Points per food item.
    #[arg(long)]
    reward: Option<u32>,

    /// Seed food placement for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// High-score file location.
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Write log records here when RUST_LOG is set.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Disable the terminal bell.
    #[arg(long)]
    mute: bool,
}

impl Cli {
    fn load_config(&self) -> Result<GameConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load_from_path(path)?,
            None => GameConfig::load_user()?,
        };

        if let Some(width) = self.width {
            config.arena_width = width;
        }
        if let Some(height) = self.height {
            config.arena_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(border) = self.border {
            config.border_thickness = border;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(reward) = self.reward {
            config.food_reward = reward;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_path = cli.log_file.clone().unwrap_or_else(logging::log_path);
    match logging::init(&log_path) {
        Ok(Some(path)) => info!("logging to {}", path.display()),
        Ok(None) => {}
        Err(error) => eprintln!(
            "arena-snake: logging disabled, cannot use {}: {error}",
            log_path.display()
        ),
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("arena-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;
    let high_scores = load_high_scores(cli.scores.clone().unwrap_or_else(scores_path));

    let mut app = App::new(config, high_scores, cli.seed)?;
    let mut bell = TerminalBell::new(!cli.mute);

    info!(
        "arena {}x{} border {}, tick {} ms",
        config.grid_size().width,
        config.grid_size().height,
        config.border_thickness,
        config.tick_interval_ms
    );

    let mut session = TerminalSession::enter()?;
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);

    // Render driver and simulation driver share this thread; only the
    // simulation driver and key handling mutate the session.
    while !app.should_quit() {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &app))?;

        if event::poll(frame_interval)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        app.update(Instant::now(), &mut bell);
    }

    Ok(())
}

fn load_high_scores(path: PathBuf) -> HighScores {
    match HighScores::load_from_path(&path) {
        Ok(scores) => scores,
        Err(error) => {
            warn!(
                "ignoring unreadable high-score file {}: {error}",
                path.display()
            );
            HighScores::empty_at(path)
        }
    }
}

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use torus_snake::config::{FRAME_INTERVAL, GameConfig};
use torus_snake::game::GameState;
use torus_snake::input::GameInput;
use torus_snake::session::{SharedGame, Ticker};
use torus_snake::terminal_runtime::TerminalSession;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with `RUST_LOG`).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = load_config(&cli)?;
    config.validate()?;

    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, config, cli.seed)
}

fn run(terminal: &mut TerminalSession, config: GameConfig, seed: Option<u64>) -> io::Result<()> {
    let game = SharedGame::new(new_game(config, seed)?);
    let mut ticker = Ticker::spawn(game.clone(), config.tick_interval());

    loop {
        game.read(|state| terminal.draw(state))?;

        match terminal.next_input(FRAME_INTERVAL)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Direction(direction)) => {
                let _ = game.set_direction(direction);
            }
            Some(GameInput::Restart) if ticker.is_finished() => {
                ticker.stop()?;
                game.replace(new_game(config, seed)?);
                ticker = Ticker::spawn(game.clone(), config.tick_interval());
                info!("restarted game");
            }
            Some(GameInput::Restart) | None => {}
        }

        if ticker.is_finished() && !game.read(GameState::is_lost) {
            warn!("ticker exited while the game was still running");
            return ticker.stop().map_err(io::Error::from);
        }
    }

    ticker.stop()?;
    let snapshot = game.snapshot();
    info!(score = snapshot.score, ticks = snapshot.tick_count, "quit");
    Ok(())
}

fn new_game(config: GameConfig, seed: Option<u64>) -> io::Result<GameState> {
    let state = match seed {
        Some(seed) => GameState::new_with_seed(config, seed)?,
        None => GameState::new(config)?,
    };
    Ok(state)
}

fn load_config(cli: &Cli) -> io::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path, false)?,
        None => match GameConfig::default_path() {
            Some(path) => GameConfig::load(&path, true)?,
            None => GameConfig::default(),
        },
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }

    Ok(config)
}

fn init_tracing(log_file: Option<&Path>) -> io::Result<()> {
    // Stdout belongs to the terminal UI, so logs only go to a file.
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

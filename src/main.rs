use std::io;
use std::path::PathBuf;

use clap::Parser;
use grid_snake::config::{GameConfig, default_config_path};
use grid_snake::game::GameState;
use grid_snake::input::InputHandler;
use grid_snake::logging::{DEFAULT_LOG_FILE, init_file_logger};
use grid_snake::scheduler::{RunOutcome, Scheduler};
use grid_snake::terminal_runtime::{TerminalFrontend, TerminalSession, install_panic_hook};
use log::{LevelFilter, error, info};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes.
    #[arg(long = "log-file", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_file_logger(&cli.log_file, cli.log_level)?;

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = match GameConfig::load(&config_path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            error!("{error}");
            std::process::exit(2);
        }
    };

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(&config, seed),
        None => GameState::new(&config),
    };
    let state = match state {
        Ok(state) => state,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(2);
        }
    };

    install_panic_hook();
    run(state, config.cell_columns)
}

fn run(state: GameState, cell_columns: u16) -> io::Result<()> {
    let mut frontend = TerminalFrontend::new(
        TerminalSession::enter()?,
        InputHandler::new(),
        cell_columns,
    );
    let mut scheduler = Scheduler::new(state);

    match scheduler.run(&mut frontend)? {
        RunOutcome::Finished { score, ticks } => {
            info!("finished with score {score} after {ticks} ticks");
            frontend.wait_for_key()?;
        }
        RunOutcome::Cancelled => info!("quit by player"),
    }

    Ok(())
}

//! minimax-chess
//!
//! Play against the fixed-depth minimax engine in a terminal, run a single
//! turn from a script, or drive the engine from a UCI GUI.

mod interactive;
mod uci;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_core::{Board, Color};
use clap::{Parser, Subcommand, ValueEnum};
use minimax_engine::{EngineConfig, EngineKind, Game};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "minimax-chess",
    version,
    about = "Play chess against a fixed-depth alpha-beta engine"
)]
struct Cli {
    /// TOML file with engine settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Search depth in plies (overrides the config file)
    #[arg(long, global = true)]
    depth: Option<u8>,

    /// Opponent engine (overrides the config file)
    #[arg(long, global = true, value_enum)]
    engine: Option<EngineArg>,

    /// Seed for the random engine
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Start from this FEN instead of the initial position
    #[arg(long, global = true)]
    fen: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive game in the terminal (the default)
    Play {
        /// Play Black; the engine opens
        #[arg(long)]
        black: bool,
    },
    /// Play one human move plus the engine's reply and print the result
    Turn {
        /// Move in coordinate notation, e.g. e2e4 or e7e8q
        #[arg(value_name = "MOVE")]
        mv: String,

        /// Print the turn report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Speak UCI on stdin/stdout
    Uci,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineArg {
    Minimax,
    Random,
}

impl From<EngineArg> for EngineKind {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Minimax => EngineKind::Minimax,
            EngineArg::Random => EngineKind::Random,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Config file values with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("cannot use config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = cli.depth {
        config.depth = depth;
    }
    if let Some(engine) = cli.engine {
        config.engine = engine.into();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate().context("invalid engine settings")?;
    Ok(config)
}

fn start_board(fen: Option<&str>) -> Result<Board> {
    match fen {
        Some(fen) => Board::from_fen(fen).with_context(|| format!("cannot parse FEN '{fen}'")),
        None => Ok(Board::default()),
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let board = start_board(cli.fen.as_deref())?;
    tracing::debug!(?config, fen = %board.to_fen(), "starting");

    match cli.command.unwrap_or(Command::Play { black: false }) {
        Command::Play { black } => {
            let human = if black { Color::Black } else { Color::White };
            let mut game = Game::with_board(board.clone(), config.build_engine(), config.depth);
            let stdin = io::stdin();
            interactive::run(&mut game, human, &board, stdin.lock(), io::stdout().lock())
                .context("interactive game failed")
        }
        Command::Turn { mv, json } => {
            let mut game = Game::with_board(board, config.build_engine(), config.depth);
            let report = game.play_turn(Some(mv.as_str()))?;
            if json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                let (engine_move, human_move, hint, score) = report.into_tuple();
                for line in [human_move, engine_move, hint] {
                    if !line.is_empty() {
                        println!("{line}");
                    }
                }
                println!("score: {score}");
            }
            Ok(())
        }
        Command::Uci => {
            let mut session = uci::UciSession::new(board, config.build_engine(), config.depth);
            let stdin = io::stdin();
            uci::run(&mut session, stdin.lock(), io::stdout().lock()).context("UCI session failed")
        }
    }
}

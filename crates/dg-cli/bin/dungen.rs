//! dungen: generate a dungeon level layout
//!
//! Prints one layout to stdout as ASCII art or JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{error, info};

use dg_cli::{CliError, Format, format_layout, log_filter, resolve_config};
use dg_core::{GameRng, LevelSetup, Strategy};

/// Procedural dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Generate a room and corridor layout", long_about = None)]
struct Args {
    /// Generation strategy (random-walk, corner-rooms, chain-rooms, grid-path)
    #[arg(short = 's', long = "strategy")]
    strategy: Option<Strategy>,

    /// JSON config file with strategy parameters
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Seed; a random one is picked if omitted
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// More log output (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<String, CliError> {
    let config = resolve_config(args.strategy, args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(|| GameRng::from_entropy().seed());
    info!("generating {} layout with seed {seed}", config.strategy());

    let mut setup = LevelSetup::new(config);
    let layout = setup.start(seed)?;
    format_layout(layout, args.format)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = log_filter(args.verbose, std::env::var_os("RUST_LOG").is_some()) {
        logger.filter_level(level);
    }
    logger.init();

    match run(&args) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            eprintln!("dungen: {err}");
            ExitCode::FAILURE
        }
    }
}

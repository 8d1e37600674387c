//! dg-cli: command-line front end for dg-core
//!
//! Builds a [`GenerationConfig`] from arguments or a JSON file, runs one
//! generation and prints the layout as ASCII or JSON.

mod render;

pub use render::{EMPTY, ENTRANCE, EXIT, render_ascii};

use std::path::Path;

use clap::ValueEnum;
use dg_core::{ConfigError, GenerationConfig, GenerationError, LevelLayout, Strategy};
use log::LevelFilter;
use thiserror::Error;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Ascii,
    Json,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("config file is for {found}, but --strategy asked for {requested}")]
    StrategyMismatch { requested: Strategy, found: Strategy },
}

/// Resolve the config to run
///
/// A config file wins over strategy defaults; if both are given they must
/// name the same strategy.
pub fn resolve_config(
    strategy: Option<Strategy>,
    config_path: Option<&Path>,
) -> Result<GenerationConfig, CliError> {
    let Some(path) = config_path else {
        return Ok(GenerationConfig::default_for(strategy.unwrap_or(Strategy::CornerRooms)));
    };

    let config = GenerationConfig::load_from_file(path)?;
    match strategy {
        Some(requested) if requested != config.strategy() => Err(CliError::StrategyMismatch {
            requested,
            found: config.strategy(),
        }),
        _ => Ok(config),
    }
}

/// Log level to force for a `-v` count
///
/// Returns None when `RUST_LOG` is set and no `-v` was given, so the
/// environment decides.
pub fn log_filter(verbose: u8, env_configured: bool) -> Option<LevelFilter> {
    match verbose {
        0 if env_configured => None,
        0 => Some(LevelFilter::Warn),
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

pub fn format_layout(layout: &LevelLayout, format: Format) -> Result<String, CliError> {
    match format {
        Format::Ascii => Ok(render_ascii(layout)),
        Format::Json => {
            let mut text = serde_json::to_string_pretty(layout)?;
            text.push('\n');
            Ok(text)
        }
    }
}

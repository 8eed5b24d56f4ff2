//! CLI command implementations for Bermap.

pub(crate) mod generate;
pub(crate) mod survey;
pub(crate) mod validate;

mod output;

use bermap::{EngineError, GenerationParameters, GridParseError};
use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Generation parameters from the command line.
///
/// Every flag is optional so that values from `--config` survive unless
/// overridden explicitly.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct ParamArgs {
    /// JSON file with generation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width of the map (default: 20)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map (default: 10)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Percentage of coins, 1-100 (default: 10)
    #[arg(short = 'c', long = "coins")]
    coins: Option<u8>,

    /// Percentage of walls, 0-99 (default: 10)
    #[arg(short = 'w', long = "walls")]
    walls: Option<u8>,

    /// Attempts before giving up (default: 5000)
    #[arg(long, conflicts_with = "unbounded")]
    max_iterations: Option<u32>,

    /// Retry until a valid map is found, without an attempt limit
    #[arg(long)]
    unbounded: bool,

    /// Per-cell chance of placing the exit or the player on a scan (default: 0.05)
    #[arg(long)]
    placement_probability: Option<f64>,
}

impl ParamArgs {
    /// Merge defaults, the config file and explicit flags, then range-check.
    pub(crate) fn resolve(&self) -> Result<GenerationParameters, CliError> {
        let mut params = match &self.config {
            Some(path) => GenerationParameters::from_json_file(path).map_err(|e| {
                CliError::new(format!("{}: {e}", path.display()))
            })?,
            None => GenerationParameters::default(),
        };

        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(coins) = self.coins {
            params.coin_rate = coins;
        }
        if let Some(walls) = self.walls {
            params.wall_rate = walls;
        }
        if let Some(max) = self.max_iterations {
            params.max_iterations = Some(max);
        }
        if self.unbounded {
            params.max_iterations = None;
        }
        if let Some(p) = self.placement_probability {
            params.placement_probability = p;
        }

        params.check()?;
        Ok(params)
    }
}

/// Set up `env_logger`. `RUST_LOG` wins over `--verbose`.
pub(crate) fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Seed from the command line, or fresh entropy.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GridParseError> for CliError {
    fn from(e: GridParseError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

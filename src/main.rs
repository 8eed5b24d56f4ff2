//! Bermap CLI - generate, check and survey walled tile-grid maps.

// Allow unwrap in tests and print in the CLI binary
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Bermap - generator and validator for walled tile-grid maps
#[derive(Parser, Debug)]
#[command(name = "bermap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log every rejected attempt (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a valid map and save it
    Generate {
        #[command(flatten)]
        params: cli::ParamArgs,

        /// Path to the save file
        #[arg(short, long, default_value = "maps/map.ber")]
        path: PathBuf,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the map to the terminal
        #[arg(long)]
        show: bool,

        /// Print cell counts and player/exit positions
        #[arg(long)]
        stats: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Check an existing map file
    Validate {
        /// Map file (.ber)
        #[arg(required = true)]
        map: PathBuf,

        /// Print the map to the terminal
        #[arg(long)]
        show: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Generate many maps in parallel and report how often generation succeeds
    Survey {
        #[command(flatten)]
        params: cli::ParamArgs,

        /// Number of driver runs (default: 1000)
        #[arg(short = 'n', long, default_value = "1000")]
        runs: u64,

        /// Starting seed (increments for each run)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Show progress bar
        #[arg(long)]
        progress: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let result = match args.command {
        Commands::Generate {
            params,
            path,
            seed,
            show,
            stats,
            format,
        } => cli::generate::execute(&params, &path, seed, show, stats, format),

        Commands::Validate { map, show, format } => cli::validate::execute(&map, show, format),

        Commands::Survey {
            params,
            runs,
            seed,
            threads,
            progress,
            format,
        } => cli::survey::execute(&params, runs, seed, threads, progress, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Survey command implementation.

use super::output::{JsonSurvey, format_survey};
use super::{CliError, OutputFormat, ParamArgs, resolve_seed};
use bermap::survey;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Execute the survey command.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or unbounded.
pub(crate) fn execute(
    params: &ParamArgs,
    runs: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    progress: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let params = params.resolve()?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(seed);

    let pb = if progress {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        Some(ProgressBar::new(runs).with_style(style))
    } else {
        None
    };

    let start = Instant::now();
    let stats = survey(&params, runs, base_seed, || {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;
    let duration = start.elapsed();

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_survey(&stats, base_seed));
            println!();
            println!(
                "Map: {}x{}, coins {}%, walls {}%, budget {}",
                params.width,
                params.height,
                params.coin_rate,
                params.wall_rate,
                params
                    .max_iterations
                    .map_or_else(|| "unbounded".to_string(), |max| format!("{max}"))
            );
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let json = JsonSurvey::from_stats(&stats, base_seed, duration.as_secs_f64());
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

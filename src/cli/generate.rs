//! Generate command implementation.

use super::output::{JsonGenerated, format_census, grid_rows};
use super::{CliError, OutputFormat, ParamArgs, resolve_seed};
use bermap::{generate_valid_seeded, write_grid};
use std::path::Path;

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, the driver gives up, or
/// the map cannot be written.
pub(crate) fn execute(
    params: &ParamArgs,
    path: &Path,
    seed: Option<u64>,
    show: bool,
    stats: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let params = params.resolve()?;
    let seed = resolve_seed(seed);

    let generated = generate_valid_seeded(&params, seed)?;
    write_grid(path, &generated.grid).map_err(|e| {
        CliError::new(format!("Failed to save {}: {e}", path.display()))
    })?;

    match format {
        OutputFormat::Text => {
            println!(
                "Map generated and saved to {} (seed {seed}, {} attempt(s))",
                path.display(),
                generated.attempts
            );
            if show {
                println!();
                print!("{}", generated.grid.render_terminal());
            }
            if stats {
                println!();
                print!("{}", format_census(&generated.grid.census()));
            }
        }
        OutputFormat::Json => {
            let json = JsonGenerated {
                seed,
                attempts: generated.attempts,
                path: path.display().to_string(),
                width: generated.grid.width(),
                height: generated.grid.height(),
                rows: grid_rows(&generated.grid),
                census: generated.grid.census(),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

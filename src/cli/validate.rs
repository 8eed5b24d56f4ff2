//! Map validation command implementation.

use super::output::{JsonValidation, format_census};
use super::{CliError, OutputFormat};
use bermap::{ValidationFailure, read_grid, validate};
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the map cannot be read or is invalid.
pub(crate) fn execute(map: &Path, show: bool, format: OutputFormat) -> Result<(), CliError> {
    let grid = read_grid(map)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", map.display())))?;
    let result = validate(&grid);
    let census = grid.census();

    match format {
        OutputFormat::Text => {
            println!("Validating: {} ({}x{})", map.display(), grid.width(), grid.height());
            println!();
            print_checks(result.failure());
            if show {
                println!();
                print!("{}", grid.render_terminal());
            }
            println!();
            print!("{}", format_census(&census));
            println!();
            println!("Result: {result}");
        }
        OutputFormat::Json => {
            let json = JsonValidation::new(map.display().to_string(), &result, census);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    if result.is_valid() {
        Ok(())
    } else {
        Err(CliError::new(format!("{} is not a valid map", map.display())))
    }
}

/// Print one line per check in the order the validator runs them.
///
/// Checks after the failing one were never run and are shown as skipped.
fn print_checks(failure: Option<ValidationFailure>) {
    let reached = failure.map_or(CHECKS.len(), stage_of);
    for (stage, name) in CHECKS.iter().enumerate() {
        if stage < reached {
            print_check(name, Some(true));
        } else if stage == reached {
            print_check(name, Some(false));
        } else {
            print_check(name, None);
        }
    }
}

/// Validator checks, in order.
const CHECKS: [&str; 6] = [
    "Surrounded by walls",
    "Exactly one player",
    "Exactly one exit",
    "At least one coin",
    "All coins reachable",
    "Exit reachable",
];

/// Index into [`CHECKS`] of the check a failure belongs to.
const fn stage_of(failure: ValidationFailure) -> usize {
    match failure {
        ValidationFailure::BorderNotWalled { .. } => 0,
        ValidationFailure::PlayerCount { .. } => 1,
        ValidationFailure::ExitCount { .. } => 2,
        ValidationFailure::NoCoins => 3,
        ValidationFailure::CoinsUnreachable { .. } => 4,
        ValidationFailure::ExitUnreachable => 5,
    }
}

fn print_check(name: &str, ok: Option<bool>) {
    let (symbol, status) = match ok {
        Some(true) => ("✓", "OK"),
        Some(false) => ("✗", "FAILED"),
        None => ("-", "skipped"),
    };
    println!("  {symbol} {name}: {status}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bermap::{Grid, parse_grid};

    fn failing_stage(grid: &Grid) -> Option<usize> {
        validate(grid).failure().map(stage_of)
    }

    #[test]
    fn test_stage_order_matches_validator() {
        let cases = [
            ("11011\n1PCE1\n11111", 0),
            ("11111\n10CE1\n11111", 1),
            ("11111\n1PC01\n11111", 2),
            ("11111\n1P0E1\n11111", 3),
            ("1111111\n1PE1C01\n1111111", 4),
            ("1111111\n1PC1E01\n1111111", 5),
        ];
        for (text, stage) in cases {
            let grid = parse_grid(text).unwrap();
            assert_eq!(failing_stage(&grid), Some(stage), "map:\n{text}");
        }
        let grid = parse_grid("11111\n1PCE1\n11111").unwrap();
        assert_eq!(failing_stage(&grid), None);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ber");
        std::fs::write(&path, "11111\n1P0E1\n11111\n").unwrap();
        assert!(execute(&path, false, OutputFormat::Json).is_err());

        std::fs::write(&path, "11111\n1PCE1\n11111\n").unwrap();
        assert!(execute(&path, false, OutputFormat::Json).is_ok());
    }
}

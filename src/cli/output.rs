//! Output formatting utilities for CLI.

// Percentages are display-only
#![allow(clippy::cast_precision_loss)]

use bermap::{Cell, Census, Grid, Position, SurveyStats, ValidationFailure, ValidationResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// JSON-serializable generation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGenerated {
    /// Seed the RNG was created from.
    pub(super) seed: u64,
    /// Attempts the driver used.
    pub(super) attempts: u32,
    /// Where the map was written.
    pub(super) path: String,
    /// Map width.
    pub(super) width: usize,
    /// Map height.
    pub(super) height: usize,
    /// Map rows in the text format.
    pub(super) rows: Vec<String>,
    /// Cell counts.
    pub(super) census: Census,
}

/// JSON-serializable validation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonValidation {
    /// Checked file.
    pub(super) file: String,
    /// Verdict.
    pub(super) valid: bool,
    /// Human-readable reason.
    pub(super) reason: String,
    /// Failed check, null when valid.
    pub(super) failure: Option<ValidationFailure>,
    /// Cell counts.
    pub(super) census: Census,
}

impl JsonValidation {
    /// Create from a verdict.
    pub(super) fn new(file: String, result: &ValidationResult, census: Census) -> Self {
        Self {
            file,
            valid: result.is_valid(),
            reason: result.reason(),
            failure: result.failure(),
            census,
        }
    }
}

/// JSON-serializable survey result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSurvey {
    /// First seed of the survey.
    base_seed: u64,
    /// Runs performed.
    runs: u64,
    /// Successful runs.
    successes: u64,
    /// Failed runs.
    failures: u64,
    /// Success rate (0.0-1.0).
    success_rate: f64,
    /// Mean attempts of successful runs.
    mean_attempts: f64,
    /// Fewest attempts of a successful run.
    min_attempts: Option<u32>,
    /// Most attempts of a successful run.
    max_attempts: u32,
    /// Failed runs per failure kind.
    failure_kinds: BTreeMap<&'static str, u64>,
    /// Wall-clock duration in seconds.
    duration_secs: f64,
}

impl JsonSurvey {
    /// Create from survey stats.
    pub(super) fn from_stats(stats: &SurveyStats, base_seed: u64, duration_secs: f64) -> Self {
        Self {
            base_seed,
            runs: stats.runs,
            successes: stats.successes,
            failures: stats.failures,
            success_rate: stats.success_rate(),
            mean_attempts: stats.mean_attempts(),
            min_attempts: stats.min_attempts(),
            max_attempts: stats.max_attempts(),
            failure_kinds: stats.failure_kinds().clone(),
            duration_secs,
        }
    }
}

/// Map rows as strings.
pub(super) fn grid_rows(grid: &Grid) -> Vec<String> {
    grid.rows()
        .map(|row| row.iter().copied().map(Cell::to_char).collect())
        .collect()
}

/// Format cell counts and positions as text.
pub(super) fn format_census(census: &Census) -> String {
    let mut output = String::new();
    let position =
        |pos: Option<Position>| pos.map_or_else(|| "none".to_string(), |p| format!("{p}"));

    let _ = writeln!(output, "Coins:           {}", census.coins);
    let _ = writeln!(output, "Walls:           {}", census.walls);
    let _ = writeln!(output, "Empty spaces:    {}", census.empty);
    if census.other > 0 {
        let _ = writeln!(output, "Custom tiles:    {}", census.other);
    }
    let _ = writeln!(output, "Player position: {}", position(census.player));
    let _ = writeln!(output, "Exit position:   {}", position(census.exit));

    output
}

/// Format survey stats as text.
pub(super) fn format_survey(stats: &SurveyStats, base_seed: u64) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Survey Results ({} runs, base seed {base_seed})", stats.runs);
    let _ = writeln!(output, "==========================================");
    let _ = writeln!(
        output,
        "  Succeeded:     {:>8} ({:.1}%)",
        stats.successes,
        stats.success_rate() * 100.0
    );
    let _ = writeln!(output, "  Failed:        {:>8}", stats.failures);

    if stats.successes > 0 {
        let _ = writeln!(output);
        let _ = writeln!(output, "Attempts per valid map:");
        let _ = writeln!(output, "  Mean:          {:>8.1}", stats.mean_attempts());
        if let Some(min) = stats.min_attempts() {
            let _ = writeln!(output, "  Min:           {min:>8}");
        }
        let _ = writeln!(output, "  Max:           {:>8}", stats.max_attempts());
    }

    if !stats.failure_kinds().is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Final rejection of failed runs:");
        for (kind, count) in stats.failure_kinds() {
            let share = *count as f64 / stats.failures.max(1) as f64 * 100.0;
            let _ = writeln!(output, "  {kind:<18} {count:>8} ({share:.1}%)");
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use bermap::{GenerationParameters, generate_valid_seeded, parse_grid, validate};

    #[test]
    fn test_grid_rows() {
        let grid = parse_grid("11111\n1P0C1\n100E1\n11111").unwrap();
        assert_eq!(grid_rows(&grid), vec!["11111", "1P0C1", "100E1", "11111"]);
    }

    #[test]
    fn test_format_census() {
        let grid = parse_grid("11111\n1P0C1\n100E1\n11111").unwrap();
        let text = format_census(&grid.census());
        assert!(text.contains("Coins:           1"));
        assert!(text.contains("Player position: (1, 1)"));
        assert!(text.contains("Exit position:   (3, 2)"));
        assert!(!text.contains("Custom"));
    }

    #[test]
    fn test_json_validation() {
        let grid = parse_grid("11111\n1P001\n100E1\n11111").unwrap();
        let result = validate(&grid);
        let json = JsonValidation::new("map.ber".to_string(), &result, grid.census());
        let value = serde_json::to_value(&json).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["failure"]["kind"], "no-coins");
        assert_eq!(value["census"]["coins"], 0);
    }

    #[test]
    fn test_format_survey() {
        let mut stats = SurveyStats::new();
        let params = GenerationParameters::default();
        stats.record(&generate_valid_seeded(&params, 1));
        let text = format_survey(&stats, 1);
        assert!(text.contains("1 runs"));
        assert!(text.contains("Attempts per valid map"));
    }
}

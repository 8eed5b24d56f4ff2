//! Batch survey: how often does a parameter set yield a valid map?
//!
//! Runs many independent driver calls and aggregates the outcomes. Run `i`
//! owns a `StdRng` seeded with `base_seed + i`, so runs share no state and
//! a survey is reproducible regardless of thread count.

// Survey statistics use intentional casts for ratios
#![allow(clippy::cast_precision_loss)]

use crate::driver::{Generated, generate_valid_seeded};
use crate::error::{EngineError, PLACEMENT_STALLED};
use crate::params::GenerationParameters;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated survey outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurveyStats {
    /// Driver runs performed.
    pub runs: u64,
    /// Runs that produced a valid map.
    pub successes: u64,
    /// Runs that ended in an error.
    pub failures: u64,
    /// Attempts summed over successful runs.
    total_attempts: u64,
    /// Fewest attempts a successful run needed.
    min_attempts: Option<u32>,
    /// Most attempts a successful run needed.
    max_attempts: u32,
    /// Failed runs keyed by the kind of the final rejection.
    failure_kinds: BTreeMap<&'static str, u64>,
}

impl SurveyStats {
    /// Create empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one driver outcome.
    pub fn record(&mut self, outcome: &Result<Generated, EngineError>) {
        self.runs += 1;
        match outcome {
            Ok(generated) => {
                self.successes += 1;
                self.total_attempts += u64::from(generated.attempts);
                self.min_attempts = Some(
                    self.min_attempts
                        .map_or(generated.attempts, |min| min.min(generated.attempts)),
                );
                self.max_attempts = self.max_attempts.max(generated.attempts);
            }
            Err(err) => {
                self.failures += 1;
                let kind = match err {
                    EngineError::IterationBudgetExhausted { last_failure, .. } => {
                        last_failure.kind()
                    }
                    EngineError::PlacementStalled { .. } => PLACEMENT_STALLED,
                    EngineError::InvalidParameters { .. } => "invalid-parameters",
                    EngineError::DegenerateGeometry { .. } => "degenerate-geometry",
                };
                *self.failure_kinds.entry(kind).or_insert(0) += 1;
            }
        }
    }

    /// Merge another set of stats into this one.
    pub fn merge(&mut self, other: &SurveyStats) {
        self.runs += other.runs;
        self.successes += other.successes;
        self.failures += other.failures;
        self.total_attempts += other.total_attempts;
        self.min_attempts = match (self.min_attempts, other.min_attempts) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_attempts = self.max_attempts.max(other.max_attempts);
        for (kind, count) in &other.failure_kinds {
            *self.failure_kinds.entry(*kind).or_insert(0) += count;
        }
    }

    /// Fraction of runs that succeeded (0.0-1.0).
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.successes as f64 / self.runs as f64
    }

    /// Mean attempts per successful run.
    #[must_use]
    pub fn mean_attempts(&self) -> f64 {
        if self.successes == 0 {
            return 0.0;
        }
        self.total_attempts as f64 / self.successes as f64
    }

    /// Fewest attempts any successful run needed.
    #[must_use]
    pub const fn min_attempts(&self) -> Option<u32> {
        self.min_attempts
    }

    /// Most attempts any successful run needed.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Failed runs per failure kind.
    #[must_use]
    pub const fn failure_kinds(&self) -> &BTreeMap<&'static str, u64> {
        &self.failure_kinds
    }
}

/// Run `runs` independent driver calls in parallel and aggregate them.
///
/// `on_run` is called once after each run, from whichever worker thread
/// finished it.
///
/// # Errors
///
/// Returns an error if the parameters are out of range or carry no
/// iteration budget, since an unbounded run may never finish.
pub fn survey<F>(
    params: &GenerationParameters,
    runs: u64,
    base_seed: u64,
    on_run: F,
) -> Result<SurveyStats, EngineError>
where
    F: Fn() + Sync,
{
    params.check()?;
    if params.max_iterations.is_none() {
        return Err(EngineError::InvalidParameters {
            field: "max_iterations",
            reason: "a survey needs a bounded iteration budget".to_string(),
        });
    }

    // Each worker folds into its own stats, merged once at the end.
    let stats = (0..runs)
        .into_par_iter()
        .fold(SurveyStats::new, |mut local, i| {
            let outcome = generate_valid_seeded(params, base_seed.wrapping_add(i));
            local.record(&outcome);
            on_run();
            local
        })
        .reduce(SurveyStats::new, |mut a, b| {
            a.merge(&b);
            a
        });

    Ok(stats)
}

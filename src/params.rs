//! Generation parameters and their range checks.

use crate::error::{ConfigError, EngineError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Smallest accepted width or height.
pub const MIN_DIMENSION: usize = 3;

/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 150;

/// Interior cells needed to hold a player, an exit and one coin.
pub const MIN_INTERIOR_CELLS: usize = 3;

/// Highest coin percentage.
pub const MAX_COIN_RATE: u8 = 100;

/// Highest wall percentage. A full wall rate would seal every empty cell.
pub const MAX_WALL_RATE: u8 = 99;

/// Attempt budget used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: u32 = 5000;

/// Chance that an empty interior cell receives the exit (or the player) on a scan.
pub const DEFAULT_PLACEMENT_PROBABILITY: f64 = 0.05;

/// Everything the generator and the driver need to produce a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Grid width in cells, border included.
    pub width: usize,
    /// Grid height in cells, border included.
    pub height: usize,
    /// Percentage chance that an empty interior cell becomes a coin.
    pub coin_rate: u8,
    /// Percentage chance that a cell still empty after coin placement becomes a wall.
    pub wall_rate: u8,
    /// Attempt budget for the driver. `None` retries without limit.
    pub max_iterations: Option<u32>,
    /// Per-cell chance used while placing the exit and the player.
    pub placement_probability: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            width: 20,
            height: 10,
            coin_rate: 10,
            wall_rate: 10,
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            placement_probability: DEFAULT_PLACEMENT_PROBABILITY,
        }
    }
}

impl GenerationParameters {
    /// Create parameters with the default budget and placement probability.
    #[must_use]
    pub fn new(width: usize, height: usize, coin_rate: u8, wall_rate: u8) -> Self {
        Self {
            width,
            height,
            coin_rate,
            wall_rate,
            ..Self::default()
        }
    }

    /// Replace the attempt budget.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: Option<u32>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Load parameters from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. Ranges are not
    /// checked here, see [`GenerationParameters::check`].
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Number of non-border cells.
    #[must_use]
    pub const fn interior_cells(&self) -> usize {
        self.width.saturating_sub(2) * self.height.saturating_sub(2)
    }

    /// Coin rate as a probability in `[0, 1]`.
    #[must_use]
    pub fn coin_chance(&self) -> f64 {
        f64::from(self.coin_rate) / 100.0
    }

    /// Wall rate as a probability in `[0, 1)`.
    #[must_use]
    pub fn wall_chance(&self) -> f64 {
        f64::from(self.wall_rate) / 100.0
    }

    /// Reject out-of-range parameters before any generation starts.
    ///
    /// Nothing is clamped. A coin rate of zero is rejected because such a
    /// map can never hold the required coin.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameters`] for an out-of-range value and
    /// [`EngineError::DegenerateGeometry`] when the interior cannot hold a
    /// player, an exit and a coin.
    pub fn check(&self) -> Result<(), EngineError> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;

        let interior = self.interior_cells();
        if interior < MIN_INTERIOR_CELLS {
            return Err(EngineError::DegenerateGeometry {
                width: self.width,
                height: self.height,
                interior,
            });
        }

        if self.coin_rate == 0 || self.coin_rate > MAX_COIN_RATE {
            return Err(EngineError::InvalidParameters {
                field: "coin_rate",
                reason: format!(
                    "must be between 1 and {MAX_COIN_RATE}, got {}",
                    self.coin_rate
                ),
            });
        }

        if self.wall_rate > MAX_WALL_RATE {
            return Err(EngineError::InvalidParameters {
                field: "wall_rate",
                reason: format!(
                    "must be between 0 and {MAX_WALL_RATE}, got {}",
                    self.wall_rate
                ),
            });
        }

        if self.max_iterations == Some(0) {
            return Err(EngineError::InvalidParameters {
                field: "max_iterations",
                reason: "must be a positive integer".to_string(),
            });
        }

        let p = self.placement_probability;
        if !(p > 0.0 && p <= 1.0) {
            return Err(EngineError::InvalidParameters {
                field: "placement_probability",
                reason: format!("must be in (0, 1], got {p}"),
            });
        }

        Ok(())
    }
}

fn check_dimension(field: &'static str, value: usize) -> Result<(), EngineError> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidParameters {
            field,
            reason: format!("must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"),
        })
    }
}

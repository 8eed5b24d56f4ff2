//! Connectivity validator.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. every border cell is a wall
//! 2. exactly one player, exactly one exit, at least one coin
//! 3. every coin and the exit are reachable from the player
//!
//! The reachability check runs only once the counts are known to be right,
//! so a map without a player is reported as such and never flood filled.

mod flood;

pub use flood::{Reachability, Traversal, flood_fill};

use crate::grid::{Cell, Grid, Position};
use serde::Serialize;
use std::fmt;

/// The first invariant a grid violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValidationFailure {
    /// A border cell is not a wall.
    BorderNotWalled {
        /// First offending border cell.
        position: Position,
        /// Its character.
        found: char,
    },
    /// Player count is not exactly one.
    PlayerCount {
        /// Players found.
        found: usize,
    },
    /// Exit count is not exactly one.
    ExitCount {
        /// Exits found.
        found: usize,
    },
    /// No coin on the map.
    NoCoins,
    /// Some coins cannot be reached from the player.
    CoinsUnreachable {
        /// Coins the flood fill reached.
        reachable: usize,
        /// Coins on the map.
        total: usize,
    },
    /// The exit cannot be reached from the player.
    ExitUnreachable,
}

impl ValidationFailure {
    /// Short stable name of the failed check, for tallies and JSON.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            ValidationFailure::BorderNotWalled { .. } => "border-not-walled",
            ValidationFailure::PlayerCount { .. } => "player-count",
            ValidationFailure::ExitCount { .. } => "exit-count",
            ValidationFailure::NoCoins => "no-coins",
            ValidationFailure::CoinsUnreachable { .. } => "coins-unreachable",
            ValidationFailure::ExitUnreachable => "exit-unreachable",
        }
    }

    /// Whether the failure came from the flood fill rather than a scan.
    #[must_use]
    pub const fn is_reachability(&self) -> bool {
        matches!(
            self,
            ValidationFailure::CoinsUnreachable { .. } | ValidationFailure::ExitUnreachable
        )
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::BorderNotWalled { position, found } => {
                write!(f, "map must be surrounded by walls ('{found}' at {position})")
            }
            ValidationFailure::PlayerCount { found } => {
                write!(f, "map must contain exactly one player, found {found}")
            }
            ValidationFailure::ExitCount { found } => {
                write!(f, "map must contain exactly one exit, found {found}")
            }
            ValidationFailure::NoCoins => write!(f, "map must contain at least one coin"),
            ValidationFailure::CoinsUnreachable { reachable, total } => {
                write!(f, "only {reachable} of {total} coins are reachable from the player")
            }
            ValidationFailure::ExitUnreachable => {
                write!(f, "exit is not reachable from the player")
            }
        }
    }
}

/// Verdict of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    failure: Option<ValidationFailure>,
}

impl ValidationResult {
    /// Message reported for a valid map.
    pub const VALID_MESSAGE: &'static str = "map is valid";

    /// A passing verdict.
    #[must_use]
    pub const fn pass() -> Self {
        Self { failure: None }
    }

    /// A failing verdict.
    #[must_use]
    pub const fn fail(failure: ValidationFailure) -> Self {
        Self {
            failure: Some(failure),
        }
    }

    /// Whether every check passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    /// The failed check, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<ValidationFailure> {
        self.failure
    }

    /// Human-readable reason: the failed check or an affirmative message.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Convert into a `Result` for `?` propagation.
    ///
    /// # Errors
    ///
    /// Returns the failed check.
    pub const fn into_result(self) -> Result<(), ValidationFailure> {
        match self.failure {
            None => Ok(()),
            Some(failure) => Err(failure),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => f.write_str(Self::VALID_MESSAGE),
            Some(failure) => write!(f, "{failure}"),
        }
    }
}

/// Validate a grid against the map rules.
///
/// Runs in `O(width * height)`. The grid is not modified and the result
/// depends only on its contents.
#[must_use]
pub fn validate(grid: &Grid) -> ValidationResult {
    match check(grid) {
        Ok(()) => ValidationResult::pass(),
        Err(failure) => ValidationResult::fail(failure),
    }
}

fn check(grid: &Grid) -> Result<(), ValidationFailure> {
    check_border(grid)?;

    let census = grid.census();
    if census.players != 1 {
        return Err(ValidationFailure::PlayerCount {
            found: census.players,
        });
    }
    if census.exits != 1 {
        return Err(ValidationFailure::ExitCount {
            found: census.exits,
        });
    }
    if census.coins == 0 {
        return Err(ValidationFailure::NoCoins);
    }

    let Some(start) = census.player else {
        return Err(ValidationFailure::PlayerCount { found: 0 });
    };
    let reach = flood_fill(grid, start, Traversal::Stack);

    if reach.reachable_coins() < census.coins {
        return Err(ValidationFailure::CoinsUnreachable {
            reachable: reach.reachable_coins(),
            total: census.coins,
        });
    }
    if !reach.exit_reached() {
        return Err(ValidationFailure::ExitUnreachable);
    }

    Ok(())
}

fn check_border(grid: &Grid) -> Result<(), ValidationFailure> {
    for position in grid.border_positions() {
        match grid.get(position) {
            Some(Cell::Wall) | None => {}
            Some(cell) => {
                return Err(ValidationFailure::BorderNotWalled {
                    position,
                    found: cell.to_char(),
                });
            }
        }
    }
    Ok(())
}

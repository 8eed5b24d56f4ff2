//! Error types for the generation engine.
//!
//! A rejected candidate is not an error: it is an ordinary [`Rejection`]
//! value that the driver recovers from by retrying. Only the conditions
//! below end a generation request.

use crate::validate::ValidationFailure;
use std::fmt;
use std::io;
use thiserror::Error;

/// Tally key for a candidate whose exit/player placement stalled.
pub const PLACEMENT_STALLED: &str = "placement-stalled";

/// Why the driver threw a candidate away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The candidate was built but failed validation.
    Invalid(ValidationFailure),
    /// The exit and the player could not both be placed within the scan cap.
    PlacementStalled {
        /// Full interior scans performed.
        scans: usize,
    },
}

impl Rejection {
    /// Short stable name, shared with [`ValidationFailure::kind`].
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Rejection::Invalid(failure) => failure.kind(),
            Rejection::PlacementStalled { .. } => PLACEMENT_STALLED,
        }
    }

    /// The validation failure, if the candidate got that far.
    #[must_use]
    pub const fn validation_failure(&self) -> Option<ValidationFailure> {
        match self {
            Rejection::Invalid(failure) => Some(*failure),
            Rejection::PlacementStalled { .. } => None,
        }
    }
}

impl From<ValidationFailure> for Rejection {
    fn from(failure: ValidationFailure) -> Self {
        Rejection::Invalid(failure)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Invalid(failure) => write!(f, "{failure}"),
            Rejection::PlacementStalled { scans } => {
                write!(f, "player and exit not placed after {scans} scans")
            }
        }
    }
}

/// Fatal outcomes of a generation request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A parameter lies outside its accepted range.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameters {
        /// Name of the offending parameter.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The grid interior is too small to hold a player, an exit and a coin.
    #[error(
        "a {width}x{height} map has {interior} interior cells, at least 3 are needed \
         for a player, an exit and a coin"
    )]
    DegenerateGeometry {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Number of non-border cells.
        interior: usize,
    },

    /// The exit/player placement loop hit its safety cap without placing both.
    ///
    /// Only [`generate`](crate::generate::generate) returns this. The driver
    /// counts a stalled candidate as a rejected attempt and retries.
    #[error("could not place the player and the exit after {scans} scans of the grid")]
    PlacementStalled {
        /// Full interior scans performed.
        scans: usize,
    },

    /// No valid grid was produced within the iteration budget.
    #[error("max iterations reached after {attempts} attempts (last failure: {last_failure})")]
    IterationBudgetExhausted {
        /// Attempts made.
        attempts: u32,
        /// Why the final candidate was rejected.
        last_failure: Rejection,
    },
}

/// Errors loading a parameter file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid parameter JSON.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

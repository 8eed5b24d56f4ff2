// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Bermap: generation and verification of walled tile-grid maps.
//!
//! A map is a rectangular grid bordered by walls holding exactly one player
//! start, exactly one exit and at least one coin. Every coin and the exit
//! must be reachable from the player start without crossing a wall.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Generation Driver (retry loop)    │
//! ├──────────────────┬──────────────────┤
//! │    Placement     │   Connectivity   │
//! │    Generator     │    Validator     │
//! ├──────────────────┴──────────────────┤
//! │      Grid + `.ber` text codec       │
//! └─────────────────────────────────────┘
//! ```
//!
//! The generator only guarantees the wall border. Everything else is the
//! validator's job, and the driver keeps drawing fresh candidates until one
//! passes or the iteration budget runs out.

pub mod driver;
pub mod error;
pub mod generate;
pub mod grid;
pub mod params;
pub mod survey;
pub mod validate;

pub use driver::{Generated, generate_valid, generate_valid_seeded};
pub use error::{ConfigError, EngineError, PLACEMENT_STALLED, Rejection};
pub use generate::generate;
pub use grid::{Cell, Census, Grid, GridParseError, Position, parse_grid, read_grid, write_grid};
pub use params::GenerationParameters;
pub use survey::{SurveyStats, survey};
pub use validate::{
    Reachability, Traversal, ValidationFailure, ValidationResult, flood_fill, validate,
};

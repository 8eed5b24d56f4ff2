//! Generation driver: generate, validate, retry.
//!
//! The driver has two states. While `Generating` it draws a fresh candidate
//! and validates it; a valid candidate moves it to `Done` with success, a
//! rejected one is dropped and the next attempt starts from a blank grid.
//! With a budget configured, the rejection that uses up the last attempt
//! moves it to `Done` with [`EngineError::IterationBudgetExhausted`].
//!
//! A candidate whose exit/player placement stalls is rejected like one that
//! fails validation: it uses up an attempt and the loop carries on.
//!
//! Without a budget the loop only ends on success, which may never happen
//! for hostile parameters such as a 99% wall rate on a tiny grid.

use crate::error::{EngineError, Rejection};
use crate::generate::generate_unchecked;
use crate::grid::Grid;
use crate::params::GenerationParameters;
use crate::validate::validate;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A grid that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The valid grid.
    pub grid: Grid,
    /// Attempts used, the successful one included.
    pub attempts: u32,
}

/// Generate candidates until one validates or the budget in `params` runs out.
///
/// # Errors
///
/// Returns an error if the parameters are out of range, or if
/// `params.max_iterations` candidates were all rejected.
pub fn generate_valid<R: Rng + ?Sized>(
    params: &GenerationParameters,
    rng: &mut R,
) -> Result<Generated, EngineError> {
    params.check()?;

    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);

        let rejection = match generate_unchecked(params, rng) {
            Ok(grid) => match validate(&grid).failure() {
                None => {
                    info!(
                        "generated valid {}x{} map in {attempts} attempt(s)",
                        grid.width(),
                        grid.height()
                    );
                    return Ok(Generated { grid, attempts });
                }
                Some(failure) => Rejection::Invalid(failure),
            },
            Err(EngineError::PlacementStalled { scans }) => Rejection::PlacementStalled { scans },
            Err(err) => return Err(err),
        };

        match params.max_iterations {
            Some(max) if attempts >= max => {
                warn!("giving up after {attempts} attempts: {rejection}");
                return Err(EngineError::IterationBudgetExhausted {
                    attempts,
                    last_failure: rejection,
                });
            }
            Some(max) => debug!("invalid map, trying again (attempt {attempts}/{max}): {rejection}"),
            None => debug!("invalid map, trying again (attempt {attempts}): {rejection}"),
        }
    }
}

/// [`generate_valid`] with a fresh [`StdRng`] seeded from `seed`.
///
/// The same parameters and seed always produce the same grid.
///
/// # Errors
///
/// See [`generate_valid`].
pub fn generate_valid_seeded(
    params: &GenerationParameters,
    seed: u64,
) -> Result<Generated, EngineError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_valid(params, &mut rng)
}

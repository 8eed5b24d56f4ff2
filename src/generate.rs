//! Randomised placement generator.
//!
//! Builds one candidate grid: walls on the border, then the exit and the
//! player, then coins, then interior walls. Only the border is guaranteed;
//! counts and reachability are left to the validator.

use crate::error::EngineError;
use crate::grid::{Cell, Grid, interior_positions};
use crate::params::GenerationParameters;
use log::trace;
use rand::Rng;

/// Scans of the interior allowed per grid cell before exit/player placement gives up.
pub const PLACEMENT_SCAN_FACTOR: usize = 4;

/// Generate one candidate grid.
///
/// Consumes entropy from `rng` and nothing else. The same parameters and
/// RNG state always yield the same grid.
///
/// # Errors
///
/// Returns an error if the parameters are out of range, or if the player
/// and exit could not be placed within the scan cap.
pub fn generate<R: Rng + ?Sized>(
    params: &GenerationParameters,
    rng: &mut R,
) -> Result<Grid, EngineError> {
    params.check()?;
    generate_unchecked(params, rng)
}

/// Generate without re-checking parameters. Callers must have run
/// [`GenerationParameters::check`].
pub(crate) fn generate_unchecked<R: Rng + ?Sized>(
    params: &GenerationParameters,
    rng: &mut R,
) -> Result<Grid, EngineError> {
    let mut grid = Grid::walled(params.width, params.height).ok_or_else(|| {
        EngineError::DegenerateGeometry {
            width: params.width,
            height: params.height,
            interior: 0,
        }
    })?;

    place_exit_and_player(&mut grid, params.placement_probability, rng)?;
    scatter(&mut grid, Cell::Coin, params.coin_chance(), rng);
    scatter(&mut grid, Cell::Wall, params.wall_chance(), rng);

    Ok(grid)
}

/// Sweep the interior row by row until both the exit and the player are placed.
///
/// On each empty cell the exit gets the first draw; the player gets a second,
/// independent draw only if the exit draw did not land there.
fn place_exit_and_player<R: Rng + ?Sized>(
    grid: &mut Grid,
    probability: f64,
    rng: &mut R,
) -> Result<(), EngineError> {
    let (width, height) = (grid.width(), grid.height());
    let max_scans = PLACEMENT_SCAN_FACTOR * width * height;

    let mut exit_placed = false;
    let mut player_placed = false;
    let mut scans = 0;

    while !(exit_placed && player_placed) {
        if scans == max_scans {
            return Err(EngineError::PlacementStalled { scans });
        }
        scans += 1;

        for pos in interior_positions(width, height) {
            if grid.get(pos) != Some(Cell::Empty) {
                continue;
            }
            if !exit_placed && rng.random::<f64>() < probability {
                grid.set(pos, Cell::Exit);
                exit_placed = true;
            } else if !player_placed && rng.random::<f64>() < probability {
                grid.set(pos, Cell::Player);
                player_placed = true;
            }
            if exit_placed && player_placed {
                break;
            }
        }
    }

    trace!("placed exit and player after {scans} scan(s)");
    Ok(())
}

/// Turn each empty interior cell into `cell` with the given chance.
fn scatter<R: Rng + ?Sized>(grid: &mut Grid, cell: Cell, chance: f64, rng: &mut R) {
    for pos in interior_positions(grid.width(), grid.height()) {
        if grid.get(pos) == Some(Cell::Empty) && rng.random::<f64>() < chance {
            grid.set(pos, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_border_always_walled() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = GenerationParameters::new(12, 8, 30, 40);
        for _ in 0..50 {
            let grid = generate(&params, &mut rng).unwrap();
            assert_eq!(grid.width(), 12);
            assert_eq!(grid.height(), 8);
            for pos in grid.border_positions() {
                assert_eq!(grid.get(pos), Some(Cell::Wall));
            }
        }
    }

    #[test]
    fn test_exactly_one_player_and_exit() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = GenerationParameters::new(20, 10, 10, 10);
        for _ in 0..100 {
            let census = generate(&params, &mut rng).unwrap().census();
            assert_eq!(census.players, 1);
            assert_eq!(census.exits, 1);
            assert_eq!(census.other, 0);
        }
    }

    #[test]
    fn test_determinism() {
        let params = GenerationParameters::new(30, 15, 20, 25);
        let grid1 = generate(&params, &mut StdRng::seed_from_u64(42)).unwrap();
        let grid2 = generate(&params, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(grid1, grid2);
    }

    #[test]
    fn test_different_seeds() {
        let params = GenerationParameters::new(30, 15, 20, 25);
        let grid1 = generate(&params, &mut StdRng::seed_from_u64(42)).unwrap();
        let grid2 = generate(&params, &mut StdRng::seed_from_u64(43)).unwrap();
        assert_ne!(grid1, grid2);
    }

    #[test]
    fn test_full_coin_rate_leaves_no_empty_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = GenerationParameters::new(10, 10, 100, 99);
        let census = generate(&params, &mut rng).unwrap().census();
        assert_eq!(census.empty, 0);
        assert_eq!(census.coins, 64 - 2);
        // Coins are placed first, so walls never consume them.
        assert_eq!(census.walls, 36);
    }

    #[test]
    fn test_zero_wall_rate_keeps_interior_open() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = GenerationParameters::new(9, 7, 15, 0);
        let census = generate(&params, &mut rng).unwrap().census();
        assert_eq!(census.walls, 2 * 9 + 2 * 5);
    }

    #[test]
    fn test_smallest_grid_places_both() {
        let mut rng = StdRng::seed_from_u64(9);
        let params = GenerationParameters::new(5, 3, 50, 0);
        for _ in 0..50 {
            let census = generate(&params, &mut rng).unwrap().census();
            assert_eq!(census.players, 1);
            assert_eq!(census.exits, 1);
        }
    }

    #[test]
    fn test_rejects_degenerate_before_placing() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = GenerationParameters::new(3, 3, 10, 10);
        assert!(matches!(
            generate(&params, &mut rng),
            Err(EngineError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_placement_probability_one() {
        // Certain placement: exit on the first interior cell, player on the second.
        let mut rng = StdRng::seed_from_u64(0);
        let params = GenerationParameters {
            placement_probability: 1.0,
            ..GenerationParameters::new(6, 6, 1, 0)
        };
        let census = generate(&params, &mut rng).unwrap().census();
        assert_eq!(census.exit, Some(crate::grid::Position::new(1, 1)));
        assert_eq!(census.player, Some(crate::grid::Position::new(2, 1)));
    }

    #[test]
    fn test_placement_cap() {
        // A single interior cell can never hold both, so the cap must trigger.
        let mut grid = Grid::walled(3, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = place_exit_and_player(&mut grid, 1.0, &mut rng).unwrap_err();
        assert_eq!(
            err,
            EngineError::PlacementStalled {
                scans: PLACEMENT_SCAN_FACTOR * 9
            }
        );
    }
}

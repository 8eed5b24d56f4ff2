#![no_main]

use arbitrary::Arbitrary;
use bermap::{Cell, GenerationParameters, generate, validate};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Structured input for generator fuzzing.
#[derive(Arbitrary, Debug)]
struct GenerateInput {
    /// Grid width before clamping.
    width: u8,
    /// Grid height before clamping.
    height: u8,
    /// Coin percentage (out-of-range values must be rejected, not panic).
    coin_rate: u8,
    /// Wall percentage (out-of-range values must be rejected, not panic).
    wall_rate: u8,
    /// RNG seed.
    seed: u64,
}

fuzz_target!(|input: GenerateInput| {
    // Keep grids small enough to run fast
    let width = usize::from(input.width % 64);
    let height = usize::from(input.height % 64);
    let params = GenerationParameters::new(width, height, input.coin_rate, input.wall_rate);

    let mut rng = StdRng::seed_from_u64(input.seed);
    let Ok(grid) = generate(&params, &mut rng) else {
        return;
    };

    assert_eq!((grid.width(), grid.height()), (width, height));
    for pos in grid.border_positions() {
        assert_eq!(grid.get(pos), Some(Cell::Wall), "border breached at {pos}");
    }
    let census = grid.census();
    assert_eq!(census.players, 1);
    assert_eq!(census.exits, 1);
    let _ = validate(&grid);
});

#![no_main]

use bermap::{Traversal, flood_fill, parse_grid, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(grid) = parse_grid(text) else {
        return;
    };

    let first = validate(&grid);
    assert_eq!(first, validate(&grid), "validation must be deterministic");

    // Re-emitting and re-parsing must not change the verdict.
    let reparsed = parse_grid(&grid.to_string()).expect("own output must parse");
    assert_eq!(validate(&reparsed), first);

    if let Some(player) = grid.census().player {
        let stack = flood_fill(&grid, player, Traversal::Stack);
        let queue = flood_fill(&grid, player, Traversal::Queue);
        assert_eq!(stack, queue, "traversal order changed reachability");
    }
});

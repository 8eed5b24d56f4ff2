//! Iterative flood fill over 4-connected passable cells.

use crate::grid::{Cell, Grid, Position};
use std::collections::VecDeque;

/// Order in which the flood fill frontier is drained.
///
/// Both orders visit the same set of cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Traversal {
    /// Last in, first out (depth-first).
    #[default]
    Stack,
    /// First in, first out (breadth-first).
    Queue,
}

/// Cells reached by a flood fill and what was found among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    /// Grid width, for indexing `visited`.
    width: usize,
    /// One marker per cell, row-major.
    visited: Vec<bool>,
    /// Number of visited cells.
    cells: usize,
    /// Coins among the visited cells.
    coins: usize,
    /// Whether an exit was visited.
    exit_reached: bool,
}

impl Reachability {
    /// Whether the fill reached `pos`.
    #[must_use]
    pub fn is_reachable(&self, pos: Position) -> bool {
        pos.x < self.width
            && self
                .visited
                .get(pos.y * self.width + pos.x)
                .copied()
                .unwrap_or(false)
    }

    /// Visited markers in row-major order.
    #[must_use]
    pub fn visited(&self) -> &[bool] {
        &self.visited
    }

    /// Number of cells reached, the seed included.
    #[must_use]
    pub const fn reached_cells(&self) -> usize {
        self.cells
    }

    /// Number of coins reached.
    #[must_use]
    pub const fn reachable_coins(&self) -> usize {
        self.coins
    }

    /// Whether any exit was reached.
    #[must_use]
    pub const fn exit_reached(&self) -> bool {
        self.exit_reached
    }
}

/// Flood fill from `start` across non-wall cells, 4-directionally.
///
/// Out-of-bounds neighbours and walls block the fill. Each cell is visited
/// at most once, so the work is bounded by the grid size and no recursion
/// is involved. A `start` that is out of bounds or a wall reaches nothing.
#[must_use]
pub fn flood_fill(grid: &Grid, start: Position, traversal: Traversal) -> Reachability {
    let (width, height) = (grid.width(), grid.height());
    let mut reach = Reachability {
        width,
        visited: vec![false; width * height],
        cells: 0,
        coins: 0,
        exit_reached: false,
    };

    let Some(start_idx) = grid.index_of(start) else {
        return reach;
    };
    if !grid.cells()[start_idx].is_passable() {
        return reach;
    }

    let mut frontier = VecDeque::new();
    reach.visited[start_idx] = true;
    frontier.push_back(start);

    loop {
        let next = match traversal {
            Traversal::Stack => frontier.pop_back(),
            Traversal::Queue => frontier.pop_front(),
        };
        let Some(pos) = next else {
            break;
        };

        reach.cells += 1;
        match grid.get(pos) {
            Some(Cell::Coin) => reach.coins += 1,
            Some(Cell::Exit) => reach.exit_reached = true,
            _ => {}
        }

        let (adjacent, count) = pos.adjacent(width, height);
        for &neighbour in &adjacent[..count] {
            let idx = neighbour.y * width + neighbour.x;
            if !reach.visited[idx] && grid.cells()[idx].is_passable() {
                reach.visited[idx] = true;
                frontier.push_back(neighbour);
            }
        }
    }

    reach
}

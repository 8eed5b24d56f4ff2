//! Grid, cell and position types.

mod text;

pub use text::{GridParseError, parse_grid, read_grid, write_grid};

use serde::Serialize;

/// A position on the grid, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Get the 4-connected neighbours that lie inside a `width x height` grid.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid positions in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, width: usize, height: usize) -> ([Position; 4], usize) {
        let mut result = [Position::new(0, 0); 4];
        let mut count = 0;

        if self.y > 0 {
            result[count] = Position::new(self.x, self.y - 1); // up
            count += 1;
        }
        if self.y + 1 < height {
            result[count] = Position::new(self.x, self.y + 1); // down
            count += 1;
        }
        if self.x > 0 {
            result[count] = Position::new(self.x - 1, self.y); // left
            count += 1;
        }
        if self.x + 1 < width {
            result[count] = Position::new(self.x + 1, self.y); // right
            count += 1;
        }

        (result, count)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable wall, `'1'`.
    Wall,
    /// Open floor, `'0'`.
    Empty,
    /// Player start, `'P'`.
    Player,
    /// Exit, `'E'`.
    Exit,
    /// Collectible, `'C'`.
    Coin,
    /// Any other tag found in a hand-edited map. Passable, never generated.
    ///
    /// Only printable, non-space ASCII that is not one of the tags above can
    /// be written and read back; see [`Cell::is_encodable`].
    Other(char),
}

impl Cell {
    /// Map a text character to a cell. Unknown characters are kept as [`Cell::Other`].
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        match c {
            '1' => Cell::Wall,
            '0' => Cell::Empty,
            'P' => Cell::Player,
            'E' => Cell::Exit,
            'C' => Cell::Coin,
            other => Cell::Other(other),
        }
    }

    /// The character this cell is written as.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Cell::Wall => '1',
            Cell::Empty => '0',
            Cell::Player => 'P',
            Cell::Exit => 'E',
            Cell::Coin => 'C',
            Cell::Other(c) => c,
        }
    }

    /// Whether the text format can carry this cell unchanged.
    ///
    /// False for an [`Cell::Other`] holding whitespace, a control or non-ASCII
    /// character, or a character that reads back as a known tag.
    #[must_use]
    pub const fn is_encodable(self) -> bool {
        match self {
            Cell::Other(c) => c.is_ascii_graphic() && matches!(Cell::from_char(c), Cell::Other(_)),
            _ => true,
        }
    }

    /// Everything except walls can be walked on.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

/// Tallies of every cell kind, gathered in a single scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Census {
    /// Wall cells, border included.
    pub walls: usize,
    /// Empty cells.
    pub empty: usize,
    /// Player cells.
    pub players: usize,
    /// Exit cells.
    pub exits: usize,
    /// Coin cells.
    pub coins: usize,
    /// Cells with an unrecognised tag.
    pub other: usize,
    /// First player cell in row-major order.
    pub player: Option<Position>,
    /// First exit cell in row-major order.
    pub exit: Option<Position>,
}

/// A rectangular grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width in cells.
    width: usize,
    /// Height in cells.
    height: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid filled with `fill`.
    ///
    /// Returns `None` if width or height is zero or `fill` is not encodable.
    #[must_use]
    pub fn filled(width: usize, height: usize, fill: Cell) -> Option<Self> {
        if width == 0 || height == 0 || !fill.is_encodable() {
            return None;
        }

        Some(Self {
            width,
            height,
            cells: vec![fill; width * height],
        })
    }

    /// Create a blank map: walls on the border, empty floor inside.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn walled(width: usize, height: usize) -> Option<Self> {
        let mut grid = Self::filled(width, height, Cell::Wall)?;
        for pos in interior_positions(width, height) {
            grid.set(pos, Cell::Empty);
        }
        Some(grid)
    }

    /// Build a grid from rows of equal length.
    ///
    /// Returns `None` if there are no rows, a row is empty, rows differ in
    /// length, or a cell is not encodable.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0
            || rows
                .iter()
                .any(|row| row.len() != width || row.iter().any(|cell| !cell.is_encodable()))
        {
            return None;
        }

        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Get the width of the grid.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the grid.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Raw cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check if a position is within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Check if a position lies on the outer ring.
    #[must_use]
    pub const fn is_border(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x + 1 == self.width || pos.y + 1 == self.height
    }

    /// Convert a position to an index into the cells array.
    #[must_use]
    #[inline]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    /// Get the cell at the given position.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index_of(pos).map(|idx| self.cells[idx])
    }

    /// Set the cell at the given position.
    ///
    /// Returns `false` (leaving the grid unchanged) if the position is out of
    /// bounds or the cell is not encodable.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if !cell.is_encodable() {
            return false;
        }
        if let Some(idx) = self.index_of(pos) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Iterate over all positions and cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| (Position::new(idx % width, idx / width), cell))
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Positions of the outer ring: top row, bottom row, then the side columns.
    pub fn border_positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width, self.height);
        let top = (0..width).map(|x| Position::new(x, 0));
        let bottom = (0..width)
            .filter(move |_| height > 1)
            .map(move |x| Position::new(x, height - 1));
        let sides = (1..height.saturating_sub(1)).flat_map(move |y| {
            let right = (width > 1).then(|| Position::new(width - 1, y));
            std::iter::once(Position::new(0, y)).chain(right)
        });
        top.chain(bottom).chain(sides)
    }

    /// Count every cell kind and remember where the player and the exit are.
    #[must_use]
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for (pos, cell) in self.iter() {
            match cell {
                Cell::Wall => census.walls += 1,
                Cell::Empty => census.empty += 1,
                Cell::Player => {
                    census.players += 1;
                    if census.player.is_none() {
                        census.player = Some(pos);
                    }
                }
                Cell::Exit => {
                    census.exits += 1;
                    if census.exit.is_none() {
                        census.exit = Some(pos);
                    }
                }
                Cell::Coin => census.coins += 1,
                Cell::Other(_) => census.other += 1,
            }
        }
        census
    }

    /// Render for a terminal: one row per line, cells separated by a space.
    #[must_use]
    pub fn render_terminal(&self) -> String {
        let mut output = String::with_capacity(self.cells.len() * 2);
        for row in self.rows() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    output.push(' ');
                }
                output.push(cell.to_char());
            }
            output.push('\n');
        }
        output
    }
}

/// Non-border positions of a `width x height` grid in row-major order.
pub fn interior_positions(width: usize, height: usize) -> impl Iterator<Item = Position> {
    let xs = 1..width.saturating_sub(1);
    (1..height.saturating_sub(1)).flat_map(move |y| xs.clone().map(move |x| Position::new(x, y)))
}

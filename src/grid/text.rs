//! The `.ber` text format: one line per row, one ASCII character per cell.
//!
//! ```text
//! 11111
//! 1P0C1
//! 100E1
//! 11111
//! ```
//!
//! Writing emits a newline after every row. Reading trims surrounding
//! whitespace on each line, tolerates a missing final newline and trailing
//! blank lines, and keeps unknown characters as [`Cell::Other`]. Cells must
//! be printable, non-space ASCII; [`Grid`] enforces the same rule, so every
//! grid reads back exactly as written.

use super::{Cell, Grid};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors reading a grid from text.
#[derive(Debug, Error)]
pub enum GridParseError {
    /// The input holds no rows.
    #[error("map is empty")]
    Empty,

    /// A row's length differs from the first row's.
    #[error("row {row} has {len} cells, expected {expected} (all rows must have the same number of columns)")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Length of that row.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },

    /// A cell is whitespace, a control character or not ASCII.
    #[error("row {row}, column {column}: {found:?} is not a printable ASCII tile")]
    InvalidCharacter {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// The offending character.
        found: char,
    },

    /// The file could not be read.
    #[error("failed to read map: {0}")]
    Io(#[from] io::Error),
}

/// Parse a grid from its text form.
///
/// # Errors
///
/// Returns an error if the input is empty, rows differ in length, or a
/// character is not printable, non-space ASCII.
pub fn parse_grid(text: &str) -> Result<Grid, GridParseError> {
    let mut lines: Vec<&str> = text.lines().map(str::trim).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let expected = lines.first().map_or(0, |line| line.len());
    if expected == 0 {
        return Err(GridParseError::Empty);
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        if let Some((column, found)) =
            line.chars().enumerate().find(|(_, c)| !c.is_ascii_graphic())
        {
            return Err(GridParseError::InvalidCharacter { row, column, found });
        }
        if line.len() != expected {
            return Err(GridParseError::RaggedRow {
                row,
                len: line.len(),
                expected,
            });
        }
        rows.push(line.chars().map(Cell::from_char).collect());
    }

    Grid::from_rows(rows).ok_or(GridParseError::Empty)
}

/// Read a grid from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn read_grid(path: &Path) -> Result<Grid, GridParseError> {
    let text = fs::read_to_string(path)?;
    parse_grid(&text)
}

/// Write a grid to a file, creating missing parent directories.
///
/// # Errors
///
/// Returns an error if file operations fail.
pub fn write_grid(path: &Path, grid: &Grid) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, grid.to_string())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|cell| cell.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_grid(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;
    use tempfile::tempdir;

    const SAMPLE: &str = "11111\n1P0C1\n100E1\n11111\n";

    #[test]
    fn test_parse_sample() {
        let grid = parse_grid(SAMPLE).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.get(Position::new(1, 1)), Some(Cell::Player));
        assert_eq!(grid.get(Position::new(3, 1)), Some(Cell::Coin));
        assert_eq!(grid.get(Position::new(3, 2)), Some(Cell::Exit));
    }

    #[test]
    fn test_write_is_bit_exact() {
        let grid = parse_grid(SAMPLE).unwrap();
        assert_eq!(grid.to_string(), SAMPLE);
    }

    #[test]
    fn test_parse_tolerates_line_endings() {
        let crlf = "11111\r\n1P0C1\r\n100E1\r\n11111";
        let grid: Grid = crlf.parse().unwrap();
        assert_eq!(grid.to_string(), SAMPLE);

        let trailing = format!("{SAMPLE}\n\n");
        assert_eq!(parse_grid(&trailing).unwrap().height(), 4);
    }

    #[test]
    fn test_parse_keeps_custom_tags() {
        let grid = parse_grid("111\n1X1\n111").unwrap();
        assert_eq!(grid.get(Position::new(1, 1)), Some(Cell::Other('X')));
        assert_eq!(grid.to_string(), "111\n1X1\n111\n");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parse_grid(""), Err(GridParseError::Empty)));
        assert!(matches!(parse_grid("\n\n"), Err(GridParseError::Empty)));
    }

    #[test]
    fn test_parse_ragged() {
        let err = parse_grid("11111\n1P01\n11111\n").unwrap_err();
        assert!(matches!(
            err,
            GridParseError::RaggedRow {
                row: 1,
                len: 4,
                expected: 5
            }
        ));

        // An interior blank line is a ragged row, not a separator.
        let err = parse_grid("111\n\n111\n").unwrap_err();
        assert!(matches!(err, GridParseError::RaggedRow { row: 1, len: 0, .. }));
    }

    #[test]
    fn test_parse_invalid_characters() {
        let err = parse_grid("111\n1é1\n111").unwrap_err();
        assert!(matches!(
            err,
            GridParseError::InvalidCharacter {
                row: 1,
                column: 1,
                found: 'é'
            }
        ));

        let err = parse_grid("111\n1 1\n111").unwrap_err();
        assert!(matches!(
            err,
            GridParseError::InvalidCharacter {
                row: 1,
                column: 1,
                found: ' '
            }
        ));

        let err = parse_grid("111\n1\t1\n111").unwrap_err();
        assert!(matches!(err, GridParseError::InvalidCharacter { found: '\t', .. }));
    }

    #[test]
    fn test_custom_tags_round_trip() {
        let mut grid = Grid::walled(5, 4).unwrap();
        assert!(grid.set(Position::new(1, 1), Cell::Other('~')));
        assert!(grid.set(Position::new(3, 2), Cell::Other('#')));
        assert_eq!(parse_grid(&grid.to_string()).unwrap(), grid);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("maps").join("map.ber");
        let grid = parse_grid(SAMPLE).unwrap();

        write_grid(&path, &grid).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);

        let loaded = read_grid(&path).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_grid(&dir.path().join("nope.ber")).unwrap_err();
        assert!(matches!(err, GridParseError::Io(_)));
    }
}

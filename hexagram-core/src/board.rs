//! Hexagram board geometry and the static color legend
//!
//! The board is laid out as 21 rows of varying width. Rows 0-4 and 16-20 are
//! the top and bottom home triangles; rows 5-15 hold the four side triangles
//! at their ends with neutral cells in between.

use serde::{Deserialize, Serialize};

use crate::color::{Color, Ink};

/// Number of rows on the board
pub const ROWS: usize = 21;

/// Width of each row
pub const ROW_LENGTHS: [usize; ROWS] = [
    1, 2, 3, 4, 5, 16, 15, 14, 13, 12, 11, 12, 13, 14, 15, 16, 5, 4, 3, 2, 1,
];

/// Cells in each home triangle
pub const HOME_SIZE: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("invalid color code: {0}")]
    InvalidColor(u8),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("invalid cell: {0:?} (expected `row,col`)")]
    InvalidCell(String),

    #[error("a move needs at least one cell")]
    EmptyPath,
}

/// A board position (row, column)
///
/// Travels as a two-element array `[row, col]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if this cell is on the board
    pub fn is_valid(&self) -> bool {
        self.row < ROWS && self.col < ROW_LENGTHS[self.row]
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl std::str::FromStr for Cell {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidCell(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse().map_err(|_| invalid())?;
        let col = col.trim().parse().map_err(|_| invalid())?;
        Ok(Cell::new(row, col))
    }
}

const N: Color = Color::Neutral;
const P: Color = Color::Purple;
const G: Color = Color::Green;
const O: Color = Color::Orange;
const Y: Color = Color::Yellow;
const R: Color = Color::Red;
const B: Color = Color::Blue;

/// Color of every cell, row by row
static POINTS: [&[Color]; ROWS] = [
    &[P],
    &[P, P],
    &[P, P, P],
    &[P, P, P, P],
    &[P, P, P, P, P],
    &[B, B, B, B, B, N, N, N, N, N, N, G, G, G, G, G],
    &[B, B, B, B, N, N, N, N, N, N, N, G, G, G, G],
    &[B, B, B, N, N, N, N, N, N, N, N, G, G, G],
    &[B, B, N, N, N, N, N, N, N, N, N, G, G],
    &[B, N, N, N, N, N, N, N, N, N, N, G],
    &[N, N, N, N, N, N, N, N, N, N, N],
    &[R, N, N, N, N, N, N, N, N, N, N, O],
    &[R, R, N, N, N, N, N, N, N, N, N, O, O],
    &[R, R, R, N, N, N, N, N, N, N, N, O, O, O],
    &[R, R, R, R, N, N, N, N, N, N, N, O, O, O, O],
    &[R, R, R, R, R, N, N, N, N, N, N, O, O, O, O, O],
    &[Y, Y, Y, Y, Y],
    &[Y, Y, Y, Y],
    &[Y, Y, Y],
    &[Y, Y],
    &[Y],
];

/// What the legend shows for one cell
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub color: Color,
    pub name: &'static str,
    pub value: &'static str,
    pub ink: Ink,
}

impl From<Color> for LegendEntry {
    fn from(color: Color) -> Self {
        let info = color.info();
        Self {
            color,
            name: info.name,
            value: info.value,
            ink: info.ink,
        }
    }
}

/// Width of a row, if the row exists
pub fn row_len(row: usize) -> Option<usize> {
    ROW_LENGTHS.get(row).copied()
}

/// Color category of a cell
pub fn color_at(row: usize, col: usize) -> Result<Color, BoardError> {
    POINTS
        .get(row)
        .and_then(|cols| cols.get(col))
        .copied()
        .ok_or(BoardError::OutOfBounds { row, col })
}

/// Legend entry of a cell
pub fn legend(row: usize, col: usize) -> Result<LegendEntry, BoardError> {
    color_at(row, col).map(LegendEntry::from)
}

/// True iff the cell belongs to one of the six home triangles.
/// Cells outside the board are never in a corner.
pub fn is_in_corner(row: usize, col: usize) -> bool {
    color_at(row, col)
        .map(Color::is_player_color)
        .unwrap_or(false)
}

/// All cells on the board in row-major order
pub fn cells() -> impl Iterator<Item = Cell> {
    ROW_LENGTHS
        .iter()
        .enumerate()
        .flat_map(|(row, &len)| (0..len).map(move |col| Cell::new(row, col)))
}

/// Cells of one color category
pub fn home_cells(color: Color) -> Vec<Cell> {
    cells()
        .filter(|cell| POINTS[cell.row][cell.col] == color)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{COLORS, PLAYER_COLORS};

    #[test]
    fn test_rows_match_lengths() {
        for (row, cols) in POINTS.iter().enumerate() {
            assert_eq!(cols.len(), ROW_LENGTHS[row], "row {}", row);
        }
        assert_eq!(cells().count(), 181);
    }

    #[test]
    fn test_every_cell_has_a_known_name() {
        let names: Vec<&str> = COLORS.iter().map(|info| info.name).collect();
        for cell in cells() {
            let entry = legend(cell.row, cell.col).unwrap();
            assert!(names.contains(&entry.name), "{} has {}", cell, entry.name);
            assert!(matches!(entry.ink, Ink::Black | Ink::White));
        }
    }

    #[test]
    fn test_is_in_corner_per_category() {
        assert!(is_in_corner(0, 0)); // purple
        assert!(is_in_corner(5, 15)); // green
        assert!(is_in_corner(15, 15)); // orange
        assert!(is_in_corner(20, 0)); // yellow
        assert!(is_in_corner(11, 0)); // red
        assert!(is_in_corner(5, 0)); // blue
        assert!(!is_in_corner(10, 5)); // neutral

        for cell in cells() {
            let neutral = color_at(cell.row, cell.col).unwrap() == Color::Neutral;
            assert_eq!(is_in_corner(cell.row, cell.col), !neutral);
        }
    }

    #[test]
    fn test_legend_values() {
        let green = legend(5, 11).unwrap();
        assert_eq!(green.color, Color::Green);
        assert_eq!(green.name, "green");
        assert_eq!(green.value, "#32BC23");
        assert_eq!(green.ink, Ink::Black);

        let neutral = legend(10, 0).unwrap();
        assert_eq!(neutral.name, "black");
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(
            color_at(21, 0),
            Err(BoardError::OutOfBounds { row: 21, col: 0 })
        );
        assert!(legend(0, 1).is_err());
        assert!(!is_in_corner(4, 5));
        assert!(!Cell::new(16, 5).is_valid());
        assert!(Cell::new(15, 15).is_valid());
    }

    #[test]
    fn test_home_triangles() {
        for color in PLAYER_COLORS {
            assert_eq!(home_cells(color).len(), HOME_SIZE, "{}", color);
        }
        assert_eq!(home_cells(Color::Neutral).len(), 181 - 6 * HOME_SIZE);
    }

    #[test]
    fn test_cell_text() {
        let cell: Cell = "12, 3".parse().unwrap();
        assert_eq!(cell, Cell::new(12, 3));
        assert_eq!(cell.to_string(), "12,3");
        assert!("12".parse::<Cell>().is_err());
        assert!("a,b".parse::<Cell>().is_err());
    }

    #[test]
    fn test_cell_wire_format() {
        let json = serde_json::to_string(&vec![Cell::new(3, 0), Cell::new(5, 5)]).unwrap();
        assert_eq!(json, "[[3,0],[5,5]]");
        let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[1], Cell::new(5, 5));
    }
}

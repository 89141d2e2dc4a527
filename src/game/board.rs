//! Coordinates and the unit board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::{Piece, Seat, UnitKind};

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 12;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// A cell coordinate. Row 0 is the north edge, column 0 the west edge.
///
/// Coordinates outside the board are representable so callers can pass
/// them in; every operation rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row (0 = north).
    pub row: u8,
    /// Column (0 = west).
    pub col: u8,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check if the coordinate lies on the board.
    #[must_use]
    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major index, if on the board.
    #[must_use]
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.row as usize * BOARD_SIZE as usize + self.col as usize)
        } else {
            None
        }
    }

    /// Coordinate for a row-major index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(idx: usize) -> Self {
        let size = BOARD_SIZE as usize;
        Self::new((idx / size) as u8, (idx % size) as u8)
    }

    /// Step by `(d_row, d_col)`, returning `None` when leaving the board.
    #[must_use]
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Coord> {
        let row = i16::from(self.row) + i16::from(d_row);
        let col = i16::from(self.col) + i16::from(d_col);
        let size = i16::from(BOARD_SIZE);
        if (0..size).contains(&row) && (0..size).contains(&col) {
            u8::try_from(row)
                .ok()
                .zip(u8::try_from(col).ok())
                .map(|(r, c)| Coord::new(r, c))
        } else {
            None
        }
    }

    /// Rotate a quarter turn clockwise around the board center.
    #[must_use]
    pub const fn rotate_cw(self) -> Coord {
        Coord::new(self.col, BOARD_SIZE - 1 - self.row)
    }

    /// Rotate `turns` quarter turns clockwise.
    #[must_use]
    pub const fn rotated(self, turns: u8) -> Coord {
        let mut c = self;
        let mut i = 0;
        while i < turns % 4 {
            c = c.rotate_cw();
            i += 1;
        }
        c
    }

    /// King-move distance.
    #[must_use]
    pub const fn chebyshev(self, other: Coord) -> u8 {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        if dr > dc { dr } else { dc }
    }

    /// Taxicab distance.
    #[must_use]
    pub const fn manhattan(self, other: Coord) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Distance to the nearest board edge (0 on the rim).
    #[must_use]
    pub const fn edge_distance(self) -> u8 {
        let last = BOARD_SIZE - 1;
        let vertical = if self.row < last - self.row { self.row } else { last - self.row };
        let horizontal = if self.col < last - self.col { self.col } else { last - self.col };
        if vertical < horizontal { vertical } else { horizontal }
    }

    /// Iterate over every on-board coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Error for malformed coordinate strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCoordError(String);

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid coordinate '{}' (expected row,col)", self.0)
    }
}

impl std::error::Error for ParseCoordError {}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError(s.to_string());
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse::<u8>().map_err(|_| err())?;
        let col = col.trim().parse::<u8>().map_err(|_| err())?;
        Ok(Coord::new(row, col))
    }
}

/// Grid data had the wrong number of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeError {
    /// Cells supplied.
    pub found: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid has {} cells, expected {CELL_COUNT}", self.found)
    }
}

impl std::error::Error for ShapeError {}

/// The 12x12 unit board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<Piece>>", into = "Vec<Option<Piece>>")]
pub struct Board {
    /// Cells stored in row-major order.
    cells: Vec<Option<Piece>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Option<Piece>>> for Board {
    type Error = ShapeError;

    fn try_from(cells: Vec<Option<Piece>>) -> Result<Self, Self::Error> {
        if cells.len() == CELL_COUNT {
            Ok(Self { cells })
        } else {
            Err(ShapeError { found: cells.len() })
        }
    }
}

impl From<Board> for Vec<Option<Piece>> {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![None; CELL_COUNT],
        }
    }

    /// Get the piece at a coordinate.
    #[must_use]
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Piece> {
        coord.index().and_then(|idx| self.cells[idx])
    }

    /// Set (or clear) the cell at a coordinate.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, piece: Option<Piece>) -> bool {
        if let Some(idx) = coord.index() {
            self.cells[idx] = piece;
            true
        } else {
            false
        }
    }

    /// Place a piece, returning whatever was there.
    pub fn put(&mut self, coord: Coord, piece: Piece) -> Option<Piece> {
        coord
            .index()
            .and_then(|idx| self.cells[idx].replace(piece))
    }

    /// Remove and return the piece at a coordinate.
    pub fn take(&mut self, coord: Coord) -> Option<Piece> {
        coord.index().and_then(|idx| self.cells[idx].take())
    }

    /// Whether a cell is on the board and empty.
    #[must_use]
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        coord.index().is_some_and(|idx| self.cells[idx].is_none())
    }

    /// Iterate over occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|piece| (Coord::from_index(idx), piece)))
    }

    /// Iterate over the pieces owned by a seat.
    pub fn pieces_of(&self, seat: Seat) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.owner == seat)
    }

    /// Locate a seat's commander.
    #[must_use]
    pub fn commander_of(&self, seat: Seat) -> Option<Coord> {
        self.pieces_of(seat)
            .find(|(_, piece)| piece.kind == UnitKind::Commander)
            .map(|(coord, _)| coord)
    }

    /// Count the pieces owned by a seat.
    #[must_use]
    pub fn count_of(&self, seat: Seat) -> usize {
        self.pieces_of(seat).count()
    }

    /// Reassign every piece of `from` to `to`. Returns how many changed hands.
    pub fn reassign_owner(&mut self, from: Seat, to: Seat) -> usize {
        let mut changed = 0;
        for piece in self.cells.iter_mut().flatten() {
            if piece.owner == from {
                piece.owner = to;
                changed += 1;
            }
        }
        changed
    }

    /// Remove every piece of a seat. Returns how many were removed.
    pub fn clear_owner(&mut self, seat: Seat) -> usize {
        let mut removed = 0;
        for cell in &mut self.cells {
            if cell.is_some_and(|piece| piece.owner == seat) {
                *cell = None;
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_offset_bounds() {
        let corner = Coord::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Coord::new(1, 1)));
        assert_eq!(Coord::new(11, 11).offset(1, 0), None);
    }

    #[test]
    fn test_coord_rotation_cycle() {
        let c = Coord::new(11, 6);
        assert_eq!(c.rotate_cw(), Coord::new(6, 0));
        assert_eq!(c.rotated(2), Coord::new(0, 5));
        assert_eq!(c.rotated(3), Coord::new(5, 11));
        assert_eq!(c.rotated(4), c);
    }

    #[test]
    fn test_coord_parse() {
        assert_eq!("3,4".parse::<Coord>(), Ok(Coord::new(3, 4)));
        assert_eq!("(10, 2)".parse::<Coord>(), Ok(Coord::new(10, 2)));
        assert!("3;4".parse::<Coord>().is_err());
    }

    #[test]
    fn test_edge_distance() {
        assert_eq!(Coord::new(0, 5).edge_distance(), 0);
        assert_eq!(Coord::new(5, 6).edge_distance(), 5);
        assert_eq!(Coord::new(2, 9).edge_distance(), 2);
    }

    #[test]
    fn test_board_get_set() {
        let mut board = Board::new();
        let coord = Coord::new(4, 4);
        assert!(board.is_empty_at(coord));

        let pawn = Piece::new(UnitKind::Pawn, Seat::North);
        assert!(board.set(coord, Some(pawn)));
        assert_eq!(board.get(coord), Some(pawn));
        assert!(!board.set(Coord::new(12, 0), Some(pawn)));
        assert_eq!(board.take(coord), Some(pawn));
        assert!(board.is_empty_at(coord));
    }

    #[test]
    fn test_reassign_and_clear_owner() {
        let mut board = Board::new();
        board.put(Coord::new(0, 0), Piece::new(UnitKind::Rook, Seat::North));
        board.put(Coord::new(0, 1), Piece::new(UnitKind::Knight, Seat::North));
        board.put(Coord::new(5, 5), Piece::new(UnitKind::Pawn, Seat::South));

        assert_eq!(board.reassign_owner(Seat::North, Seat::East), 2);
        assert_eq!(board.count_of(Seat::East), 2);
        assert_eq!(board.clear_owner(Seat::East), 2);
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn test_board_shape_rejected() {
        let result = Board::try_from(vec![None; 10]);
        assert_eq!(result, Err(ShapeError { found: 10 }));
    }
}

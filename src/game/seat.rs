//! Seats (players) around the board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four seats. A seat is the player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Seat {
    /// Top edge (row 0).
    North = 0,
    /// Right edge (column 11).
    East = 1,
    /// Bottom edge (row 11).
    South = 2,
    /// Left edge (column 0).
    West = 3,
}

impl Seat {
    /// All seats in clockwise turn order.
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    /// Index into per-seat arrays.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Army color shown to players.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Seat::North => "black",
            Seat::East => "green",
            Seat::South => "white",
            Seat::West => "red",
        }
    }

    /// Quarter turns clockwise that map the South layout onto this seat.
    #[must_use]
    pub const fn rotation(self) -> u8 {
        match self {
            Seat::South => 0,
            Seat::West => 1,
            Seat::North => 2,
            Seat::East => 3,
        }
    }

    /// Pawn forward direction as `(d_row, d_col)`.
    #[must_use]
    pub const fn forward(self) -> (i8, i8) {
        match self {
            Seat::North => (1, 0),
            Seat::East => (0, -1),
            Seat::South => (-1, 0),
            Seat::West => (0, 1),
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Seat::North => "north",
            Seat::East => "east",
            Seat::South => "south",
            Seat::West => "west",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognised seat names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeatError(String);

impl fmt::Display for ParseSeatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown seat '{}' (expected north, east, south or west)", self.0)
    }
}

impl std::error::Error for ParseSeatError {}

impl FromStr for Seat {
    type Err = ParseSeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Seat::North),
            "east" | "e" => Ok(Seat::East),
            "south" | "s" => Ok(Seat::South),
            "west" | "w" => Ok(Seat::West),
            _ => Err(ParseSeatError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_parse() {
        assert_eq!("North".parse::<Seat>(), Ok(Seat::North));
        assert_eq!("w".parse::<Seat>(), Ok(Seat::West));
        assert!("center".parse::<Seat>().is_err());
    }

    #[test]
    fn test_forward_directions_point_inward() {
        assert_eq!(Seat::North.forward(), (1, 0));
        assert_eq!(Seat::South.forward(), (-1, 0));
        assert_eq!(Seat::West.forward(), (0, 1));
        assert_eq!(Seat::East.forward(), (0, -1));
    }

    #[test]
    fn test_rotations_distinct() {
        let mut rotations: Vec<u8> = Seat::ALL.iter().map(|s| s.rotation()).collect();
        rotations.sort_unstable();
        assert_eq!(rotations, vec![0, 1, 2, 3]);
    }
}

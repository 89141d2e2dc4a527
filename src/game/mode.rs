//! Game modes and the seating geometry they imply.
//!
//! Every geometric rule that depends on the mode (which seats play, who is
//! allied, where each army deploys, where pawns promote) lives here as a
//! pure lookup so that call sites never branch on the mode themselves.
//!
//! The South army is the canonical layout. The other seats use the same
//! layout rotated clockwise by `Seat::rotation` quarter turns, which puts
//! each commander in a different quadrant.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::board::BOARD_SIZE;
use crate::game::{Coord, Seat, UnitKind};

const LAST: u8 = BOARD_SIZE - 1;

/// South's back rank, west to east, starting at column `ARMY_FIRST_COL`.
const BACK_RANK: [UnitKind; 8] = [
    UnitKind::Rook,
    UnitKind::Knight,
    UnitKind::Bishop,
    UnitKind::Queen,
    UnitKind::Commander,
    UnitKind::Bishop,
    UnitKind::Knight,
    UnitKind::Rook,
];

/// First column of the canonical army band.
const ARMY_FIRST_COL: u8 = 2;

/// The four seatings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Two players, North against South.
    NorthSouth,
    /// Two players, East against West.
    EastWest,
    /// Four players, everyone for themselves.
    FreeForAll,
    /// Four players, North+South against East+West.
    Teams,
}

/// A board edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Row 0.
    North,
    /// Column 11.
    East,
    /// Row 11.
    South,
    /// Column 0.
    West,
}

impl Edge {
    /// Whether a coordinate lies on this edge.
    #[must_use]
    pub const fn contains(self, coord: Coord) -> bool {
        match self {
            Edge::North => coord.row == 0 && coord.col <= LAST,
            Edge::East => coord.col == LAST && coord.row <= LAST,
            Edge::South => coord.row == LAST && coord.col <= LAST,
            Edge::West => coord.col == 0 && coord.row <= LAST,
        }
    }
}

impl Mode {
    /// All modes.
    pub const ALL: [Mode; 4] = [Mode::NorthSouth, Mode::EastWest, Mode::FreeForAll, Mode::Teams];

    /// Seats taking part, in turn order.
    #[must_use]
    pub const fn seats(self) -> &'static [Seat] {
        match self {
            Mode::NorthSouth => &[Seat::North, Seat::South],
            Mode::EastWest => &[Seat::East, Seat::West],
            Mode::FreeForAll | Mode::Teams => &Seat::ALL,
        }
    }

    /// Whether a seat plays in this mode.
    #[must_use]
    pub fn has_seat(self, seat: Seat) -> bool {
        self.seats().contains(&seat)
    }

    /// Whether this is a four-player mode.
    #[must_use]
    pub const fn is_four_player(self) -> bool {
        matches!(self, Mode::FreeForAll | Mode::Teams)
    }

    /// Whether two distinct seats fight on the same side.
    #[must_use]
    pub const fn are_allied(self, a: Seat, b: Seat) -> bool {
        if a as u8 == b as u8 {
            return true;
        }
        match self {
            Mode::Teams => team_of(a) == team_of(b),
            _ => false,
        }
    }

    /// Whether `a` may capture (and is threatened by) `b`.
    #[must_use]
    #[inline]
    pub const fn are_hostile(self, a: Seat, b: Seat) -> bool {
        !self.are_allied(a, b)
    }

    /// Edges on which a seat's pawns promote.
    ///
    /// Two-player modes promote on the far edge only. Four-player modes
    /// promote on the two edges that do not border the seat's home quadrant.
    #[must_use]
    pub const fn promotion_edges(self, seat: Seat) -> &'static [Edge] {
        match (self.is_four_player(), seat) {
            (false, Seat::North) => &[Edge::South],
            (false, Seat::South) => &[Edge::North],
            (false, Seat::West) => &[Edge::East],
            (false, Seat::East) => &[Edge::West],
            (true, Seat::North) => &[Edge::South, Edge::East],
            (true, Seat::East) => &[Edge::South, Edge::West],
            (true, Seat::South) => &[Edge::North, Edge::West],
            (true, Seat::West) => &[Edge::North, Edge::East],
        }
    }

    /// Whether a pawn of `seat` promotes on reaching `coord`.
    #[must_use]
    pub fn is_promotion_cell(self, seat: Seat, coord: Coord) -> bool {
        self.promotion_edges(seat).iter().any(|edge| edge.contains(coord))
    }

    /// Whether `coord` is part of a seat's starting territory.
    #[must_use]
    pub fn in_territory(self, seat: Seat, coord: Coord) -> bool {
        if !coord.in_bounds() || !self.has_seat(seat) {
            return false;
        }
        // Undo the seat's rotation to test against South's band.
        let canonical = coord.rotated(4 - seat.rotation() % 4);
        let in_rows = canonical.row >= LAST - 1;
        if self.is_four_player() {
            in_rows && (ARMY_FIRST_COL..ARMY_FIRST_COL + 8).contains(&canonical.col)
        } else {
            in_rows
        }
    }

    /// Every starting-territory cell of a seat, row-major.
    #[must_use]
    pub fn territory(self, seat: Seat) -> Vec<Coord> {
        Coord::all().filter(|&c| self.in_territory(seat, c)).collect()
    }

    /// Seat whose starting territory contains `coord`, if any.
    #[must_use]
    pub fn territory_owner(self, coord: Coord) -> Option<Seat> {
        self.seats()
            .iter()
            .copied()
            .find(|&seat| self.in_territory(seat, coord))
    }

    /// Whether the remaining players end the game.
    ///
    /// The game ends when one player is left, or in `Teams` when every
    /// survivor fights on the same side.
    #[must_use]
    pub fn is_decided(self, active: &[Seat]) -> bool {
        match active.split_first() {
            None => true,
            Some((first, rest)) => rest.iter().all(|&s| self.are_allied(*first, s)),
        }
    }
}

/// Team index in `Teams` mode.
const fn team_of(seat: Seat) -> u8 {
    match seat {
        Seat::North | Seat::South => 0,
        Seat::East | Seat::West => 1,
    }
}

/// The standard full-strength army of a seat as `(cell, kind)` pairs.
#[must_use]
pub fn standard_army(seat: Seat) -> Vec<(Coord, UnitKind)> {
    let turns = seat.rotation();
    let mut army = Vec::with_capacity(16);
    for (i, &kind) in BACK_RANK.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let col = ARMY_FIRST_COL + i as u8;
        army.push((Coord::new(LAST, col).rotated(turns), kind));
        army.push((Coord::new(LAST - 1, col).rotated(turns), UnitKind::Pawn));
    }
    army
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::NorthSouth => "north-south",
            Mode::EastWest => "east-west",
            Mode::FreeForAll => "free-for-all",
            Mode::Teams => "teams",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_counts() {
        assert_eq!(Mode::NorthSouth.seats().len(), 2);
        assert_eq!(Mode::EastWest.seats().len(), 2);
        assert_eq!(Mode::FreeForAll.seats().len(), 4);
        assert_eq!(Mode::Teams.seats().len(), 4);
    }

    #[test]
    fn test_alliances() {
        assert!(Mode::Teams.are_allied(Seat::North, Seat::South));
        assert!(Mode::Teams.are_hostile(Seat::North, Seat::East));
        assert!(Mode::FreeForAll.are_hostile(Seat::North, Seat::South));
        assert!(Mode::FreeForAll.are_allied(Seat::West, Seat::West));
    }

    #[test]
    fn test_two_player_promotion_edges() {
        assert!(Mode::NorthSouth.is_promotion_cell(Seat::North, Coord::new(11, 4)));
        assert!(!Mode::NorthSouth.is_promotion_cell(Seat::North, Coord::new(0, 4)));
        assert!(Mode::NorthSouth.is_promotion_cell(Seat::South, Coord::new(0, 4)));
        assert!(Mode::EastWest.is_promotion_cell(Seat::West, Coord::new(6, 11)));
        assert!(Mode::EastWest.is_promotion_cell(Seat::East, Coord::new(6, 0)));
    }

    #[test]
    fn test_four_player_promotion_edges_face_away_from_home() {
        for &seat in Mode::FreeForAll.seats() {
            let (commander, _) = standard_army(seat)
                .into_iter()
                .find(|(_, kind)| *kind == UnitKind::Commander)
                .unwrap();
            for edge in Mode::FreeForAll.promotion_edges(seat) {
                // The home quadrant never touches a promotion edge.
                let near = match edge {
                    Edge::North => commander.row < 6,
                    Edge::South => commander.row >= 6,
                    Edge::West => commander.col < 6,
                    Edge::East => commander.col >= 6,
                };
                assert!(!near, "{seat} promotes on an edge bordering its home quadrant");
            }
        }
    }

    #[test]
    fn test_standard_armies_fit_their_territory() {
        for mode in Mode::ALL {
            for &seat in mode.seats() {
                for (cell, _) in standard_army(seat) {
                    assert!(mode.in_territory(seat, cell), "{seat} {cell} outside territory");
                }
            }
        }
    }

    #[test]
    fn test_four_player_territories_disjoint() {
        let mut seen = std::collections::HashSet::new();
        for &seat in Mode::FreeForAll.seats() {
            let cells = Mode::FreeForAll.territory(seat);
            assert_eq!(cells.len(), 16);
            for cell in cells {
                assert!(seen.insert(cell), "{cell} claimed twice");
            }
        }
    }

    #[test]
    fn test_two_player_territory_full_width() {
        let cells = Mode::NorthSouth.territory(Seat::North);
        assert_eq!(cells.len(), 24);
        assert!(cells.iter().all(|c| c.row <= 1));
        assert_eq!(Mode::NorthSouth.territory_owner(Coord::new(10, 0)), Some(Seat::South));
        assert_eq!(Mode::NorthSouth.territory_owner(Coord::new(5, 5)), None);
    }

    #[test]
    fn test_is_decided() {
        assert!(Mode::FreeForAll.is_decided(&[Seat::East]));
        assert!(!Mode::FreeForAll.is_decided(&[Seat::East, Seat::West]));
        assert!(Mode::Teams.is_decided(&[Seat::East, Seat::West]));
        assert!(!Mode::Teams.is_decided(&[Seat::North, Seat::West]));
    }

    #[test]
    fn test_commander_positions() {
        let find = |seat| {
            standard_army(seat)
                .into_iter()
                .find(|(_, k)| *k == UnitKind::Commander)
                .map(|(c, _)| c)
        };
        assert_eq!(find(Seat::South), Some(Coord::new(11, 6)));
        assert_eq!(find(Seat::West), Some(Coord::new(6, 0)));
        assert_eq!(find(Seat::North), Some(Coord::new(0, 5)));
        assert_eq!(find(Seat::East), Some(Coord::new(5, 11)));
    }
}
